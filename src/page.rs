use chrono::{Datelike as _, NaiveDate};

use crate::formats::Snapshot;
use crate::render;
use crate::template::{Fields, Placeholder, Template};

const WEEKDAY_CN: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];

/// Where the archive link of a page instantiation points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLink {
    /// The current-day page, one level above the archive folder.
    Home,
    /// A dated copy living inside the archive folder.
    Archived,
}

impl ArchiveLink {
    pub fn href(self) -> &'static str {
        match self {
            Self::Home => "archive/index.html",
            Self::Archived => "index.html",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComposedPages {
    pub home: String,
    pub archived: String,
}

pub fn compose(template: &Template, snapshot: &Snapshot, date: NaiveDate) -> ComposedPages {
    let mut fields = page_fields(snapshot, date);

    fields.insert(Placeholder::ArchiveLink, ArchiveLink::Home.href().to_owned());
    let home = template.render(&fields);

    fields.insert(
        Placeholder::ArchiveLink,
        ArchiveLink::Archived.href().to_owned(),
    );
    let archived = template.render(&fields);

    ComposedPages { home, archived }
}

/// Every placeholder value except [`Placeholder::ArchiveLink`].
pub fn page_fields(snapshot: &Snapshot, date: NaiveDate) -> Fields {
    use render::escape_html as esc;

    let weather = &snapshot.weather;
    let hero = &snapshot.hero_news;

    let mut fields = Fields::new();
    fields.insert(Placeholder::DateCn, date_cn(date));
    fields.insert(Placeholder::DateFull, date.format("%Y.%m.%d").to_string());
    fields.insert(Placeholder::DateIso, iso_date(date));
    fields.insert(Placeholder::WeekdayCn, weekday_cn(date).to_owned());
    fields.insert(Placeholder::SessionId, esc(snapshot.display_session_id()));

    fields.insert(Placeholder::WeatherCity, esc(&weather.city));
    fields.insert(Placeholder::WeatherTempVal, esc(&weather.temp));
    fields.insert(Placeholder::WeatherCond, esc(&weather.cond));
    fields.insert(Placeholder::WeatherAdvice, esc(&weather.advice));

    fields.insert(Placeholder::HeroTitle, esc(hero.display_title()));
    fields.insert(Placeholder::HeroSource, esc(&hero.source));
    fields.insert(Placeholder::HeroSummary, esc(&hero.summary));
    fields.insert(Placeholder::HeroTakeaway, esc(&hero.takeaway));
    fields.insert(Placeholder::HeroUrl, esc(render::link_href(&hero.url)));
    fields.insert(
        Placeholder::HeroImage,
        esc(render::hero_image_url(&hero.image_keyword)),
    );

    fields.insert(
        Placeholder::ThemeTags,
        render::render_theme_tags(&snapshot.themes),
    );
    fields.insert(
        Placeholder::ActionList,
        render::render_list(
            &snapshot.actions,
            render::render_action_item,
            render::EMPTY_ACTIONS,
        ),
    );
    fields.insert(
        Placeholder::SignalList,
        render::render_list(
            &snapshot.signals,
            render::render_signal_item,
            render::EMPTY_SIGNALS,
        ),
    );
    fields.insert(
        Placeholder::ImportantList,
        render::render_list(
            &snapshot.important,
            render::render_important_card,
            render::EMPTY_IMPORTANT,
        ),
    );

    for (placeholder, items) in [
        (Placeholder::SaveList, &snapshot.save),
        (Placeholder::IgnoreList, &snapshot.ignore),
        (Placeholder::AgentNewsList, &snapshot.agent_news),
        (Placeholder::TechNewsList, &snapshot.tech_news),
        (Placeholder::SecondaryNewsList, &snapshot.secondary_news),
    ] {
        fields.insert(
            placeholder,
            render::render_list(
                items,
                render::render_simple_list_item,
                render::EMPTY_ENTRIES,
            ),
        );
    }

    fields.insert(
        Placeholder::StockList,
        render::render_list(
            &snapshot.stocks,
            render::render_stock_row,
            render::EMPTY_ENTRIES,
        ),
    );
    fields.insert(
        Placeholder::HackerNewsList,
        render::render_list(
            &snapshot.hacker_news,
            render::render_hacker_news_item,
            render::EMPTY_ENTRIES,
        ),
    );
    fields.insert(
        Placeholder::GithubTrendingList,
        render::render_list(
            &snapshot.github_trending,
            render::render_github_trending_item,
            render::EMPTY_ENTRIES,
        ),
    );

    fields
}

pub fn date_cn(date: NaiveDate) -> String {
    date.format("%m月%d日").to_string()
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn weekday_cn(date: NaiveDate) -> &'static str {
    WEEKDAY_CN[date.weekday().num_days_from_monday() as usize]
}
