use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context as _;
use regex::{Captures, Regex};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("placeholder token regex is valid")
});

/// Closed set of tokens a page template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    DateCn,
    DateFull,
    DateIso,
    WeekdayCn,
    SessionId,
    WeatherCity,
    WeatherTempVal,
    WeatherCond,
    WeatherAdvice,
    HeroTitle,
    HeroSource,
    HeroSummary,
    HeroTakeaway,
    HeroUrl,
    HeroImage,
    ThemeTags,
    ActionList,
    SignalList,
    ImportantList,
    SaveList,
    IgnoreList,
    AgentNewsList,
    TechNewsList,
    SecondaryNewsList,
    StockList,
    HackerNewsList,
    GithubTrendingList,
    ArchiveLink,
}

impl Placeholder {
    pub const ALL: [Placeholder; 28] = [
        Self::DateCn,
        Self::DateFull,
        Self::DateIso,
        Self::WeekdayCn,
        Self::SessionId,
        Self::WeatherCity,
        Self::WeatherTempVal,
        Self::WeatherCond,
        Self::WeatherAdvice,
        Self::HeroTitle,
        Self::HeroSource,
        Self::HeroSummary,
        Self::HeroTakeaway,
        Self::HeroUrl,
        Self::HeroImage,
        Self::ThemeTags,
        Self::ActionList,
        Self::SignalList,
        Self::ImportantList,
        Self::SaveList,
        Self::IgnoreList,
        Self::AgentNewsList,
        Self::TechNewsList,
        Self::SecondaryNewsList,
        Self::StockList,
        Self::HackerNewsList,
        Self::GithubTrendingList,
        Self::ArchiveLink,
    ];

    /// Tokens the archive index depends on: the date heading, the hero
    /// heading and the link between home and archive.
    pub const REQUIRED: [Placeholder; 3] = [Self::DateCn, Self::HeroTitle, Self::ArchiveLink];

    pub fn name(self) -> &'static str {
        match self {
            Self::DateCn => "DATE_CN",
            Self::DateFull => "DATE_FULL",
            Self::DateIso => "DATE_ISO",
            Self::WeekdayCn => "WEEKDAY_CN",
            Self::SessionId => "SESSION_ID",
            Self::WeatherCity => "WEATHER_CITY",
            Self::WeatherTempVal => "WEATHER_TEMP_VAL",
            Self::WeatherCond => "WEATHER_COND",
            Self::WeatherAdvice => "WEATHER_ADVICE",
            Self::HeroTitle => "HERO_TITLE",
            Self::HeroSource => "HERO_SOURCE",
            Self::HeroSummary => "HERO_SUMMARY",
            Self::HeroTakeaway => "HERO_TAKEAWAY",
            Self::HeroUrl => "HERO_URL",
            Self::HeroImage => "HERO_IMAGE",
            Self::ThemeTags => "THEME_TAGS",
            Self::ActionList => "ACTION_LIST",
            Self::SignalList => "SIGNAL_LIST",
            Self::ImportantList => "IMPORTANT_LIST",
            Self::SaveList => "SAVE_LIST",
            Self::IgnoreList => "IGNORE_LIST",
            Self::AgentNewsList => "AGENT_NEWS_LIST",
            Self::TechNewsList => "TECH_NEWS_LIST",
            Self::SecondaryNewsList => "SECONDARY_NEWS_LIST",
            Self::StockList => "STOCK_LIST",
            Self::HackerNewsList => "HACKER_NEWS_LIST",
            Self::GithubTrendingList => "GITHUB_TRENDING_LIST",
            Self::ArchiveLink => "ARCHIVE_LINK",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|placeholder| placeholder.name() == name)
    }

    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }
}

/// Placeholder values for one page instantiation.
pub type Fields = BTreeMap<Placeholder, String>;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template references unknown placeholder `{0}`")]
    UnknownPlaceholder(String),
    #[error("template is missing required placeholder `{0}`")]
    MissingRequired(&'static str),
}

/// A page template whose tokens have been checked against [`Placeholder`].
///
/// Any `{{ ... }}` span counts as a token, so a misspelled or lowercase name
/// is rejected instead of leaking into the page.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    placeholders: BTreeSet<Placeholder>,
}

impl Template {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("read template: {}", path.display()))?;
        let template =
            Self::parse(source).with_context(|| format!("validate template: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            placeholders = template.placeholders.len(),
            "loaded template"
        );
        Ok(template)
    }

    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let mut placeholders = BTreeSet::new();
        for captures in TOKEN_RE.captures_iter(&source) {
            let name = &captures[1];
            let placeholder = Placeholder::from_name(name)
                .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_owned()))?;
            placeholders.insert(placeholder);
        }

        if let Some(missing) = Placeholder::REQUIRED
            .into_iter()
            .find(|required| !placeholders.contains(required))
        {
            return Err(TemplateError::MissingRequired(missing.name()));
        }

        Ok(Self {
            source,
            placeholders,
        })
    }

    pub fn placeholders(&self) -> &BTreeSet<Placeholder> {
        &self.placeholders
    }

    /// Substitutes every token in a single pass, so values that happen to
    /// contain token text are never expanded again. Tokens without a value
    /// stay in the output verbatim.
    pub fn render(&self, fields: &Fields) -> String {
        for placeholder in &self.placeholders {
            if !fields.contains_key(placeholder) {
                tracing::warn!(
                    placeholder = placeholder.name(),
                    "no value for template placeholder; leaving it as-is"
                );
            }
        }

        TOKEN_RE
            .replace_all(&self.source, |captures: &Captures<'_>| {
                Placeholder::from_name(&captures[1])
                    .and_then(|placeholder| fields.get(&placeholder))
                    .cloned()
                    .unwrap_or_else(|| captures[0].to_owned())
            })
            .into_owned()
    }
}
