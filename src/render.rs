//! HTML fragments for each content category of the briefing page.
//!
//! Every renderer takes one record and returns a self-contained fragment.
//! Missing fields render as empty text or neutral styling.

use rand::Rng;

use crate::formats::{
    ActionItem, GithubRepoItem, HackerNewsItem, NewsItem, Priority, StockItem, Trend,
};

pub const SPARKLINE_WIDTH: u32 = 60;
pub const SPARKLINE_HEIGHT: u32 = 20;
pub const SPARKLINE_POINTS: usize = 7;

const SPARKLINE_MARGIN: u32 = 2;
const SPARKLINE_BAND: u32 = 5;

pub const EMPTY_ACTIONS: &str = "暂无需要处理的事项";
pub const EMPTY_SIGNALS: &str = "暂无新增信号";
pub const EMPTY_IMPORTANT: &str = "暂无重要信息";
pub const EMPTY_THEMES: &str = "暂无主题";
pub const EMPTY_ENTRIES: &str = "暂无条目";

const HERO_IMAGE_BIOTECH: &str = "https://image.pollinations.ai/prompt/dna%20double%20helix%20biotech%20laboratory%20dark%20cinematic?width=1200&height=600&nologo=true";
const HERO_IMAGE_SEMICONDUCTOR: &str = "https://image.pollinations.ai/prompt/semiconductor%20chip%20wafer%20macro%20neon%20dark?width=1200&height=600&nologo=true";
const HERO_IMAGE_GENERIC: &str = "https://image.pollinations.ai/prompt/abstract%20technology%20network%20dark%20minimal?width=1200&height=600&nologo=true";

/// Joins rendered items with newlines, or returns the fixed "no entries"
/// fragment so the section keeps its shape when the list is empty.
pub fn render_list<T>(items: &[T], render: fn(&T) -> String, empty_label: &str) -> String {
    if items.is_empty() {
        return render_empty(empty_label);
    }
    items.iter().map(render).collect::<Vec<_>>().join("\n")
}

pub fn render_empty(label: &str) -> String {
    format!(
        "<div class=\"text-xs text-neutral-600\">{}</div>",
        escape_html(label)
    )
}

pub fn render_theme_tags(themes: &[String]) -> String {
    if themes.is_empty() {
        return format!(
            "<span class=\"text-[10px] text-neutral-600\">{}</span>",
            escape_html(EMPTY_THEMES)
        );
    }
    themes
        .iter()
        .map(|tag| render_theme_tag(tag))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_theme_tag(tag: &str) -> String {
    format!(
        "<span class=\"text-[10px] px-2 py-0.5 rounded border border-neutral-800 text-neutral-300\">{}</span>",
        escape_html(tag)
    )
}

/// Text color and background for a priority badge.
pub fn priority_palette(priority: &Priority) -> (&'static str, &'static str) {
    match priority {
        Priority::High => ("#f87171", "rgba(248, 113, 113, 0.12)"),
        Priority::Low => ("#94a3b8", "rgba(148, 163, 184, 0.12)"),
        Priority::Medium | Priority::Other(_) => ("#fbbf24", "rgba(251, 191, 36, 0.12)"),
    }
}

pub fn render_action_item(item: &ActionItem) -> String {
    let (color, bg) = priority_palette(&item.priority);
    format!(
        r#"
    <div class="flex items-start gap-3">
        <span class="mono text-[10px] px-1.5 py-0.5 rounded" style="color:{color};background-color:{bg};">{label}优先级</span>
        <div class="flex-1">
            <div class="text-sm text-neutral-200">{title}</div>
            <div class="text-[11px] text-neutral-500 mt-1">{detail}</div>
        </div>
    </div>
    "#,
        label = escape_html(item.priority.label()),
        title = escape_html(&item.title),
        detail = escape_html(&item.detail),
    )
}

pub fn render_signal_item(item: &NewsItem) -> String {
    format!(
        r#"
    <div class="flex items-start gap-3">
        <div class="w-1.5 h-1.5 mt-2 rounded-full bg-blue-400"></div>
        <div class="flex-1">
            <a href="{url}" target="_blank" class="text-sm text-neutral-300 hover:text-white transition-colors">{title}</a>
            <div class="text-[11px] text-neutral-500 mt-1">{meta}</div>
        </div>
    </div>
    "#,
        url = escape_html(link_href(&item.url)),
        title = escape_html(&item.title),
        meta = meta_line(&[item.detail_text(), &item.source, &item.time]),
    )
}

pub fn render_important_card(item: &NewsItem) -> String {
    format!(
        r#"
    <div class="group relative p-5 rounded-xl transition-all hover:bg-neutral-900" style="background-color:#111111;border:1px solid #262626;">
        <div class="flex items-center justify-between mb-3">
            <span class="mono text-[9px] font-bold text-blue-300/80 uppercase tracking-wider px-1.5 py-0.5 rounded border border-blue-500/20 bg-blue-500/5">{source}</span>
            <span class="mono text-[10px] text-neutral-600">{time}</span>
        </div>
        <a href="{url}" target="_blank" class="block">
            <h3 class="text-sm font-medium text-neutral-200 group-hover:text-white leading-relaxed transition-colors">{title}</h3>
            <p class="text-[11px] text-neutral-500 mt-2 leading-relaxed">{summary}</p>
        </a>
    </div>
    "#,
        source = escape_html(&item.source),
        time = escape_html(&item.time),
        url = escape_html(link_href(&item.url)),
        title = escape_html(&item.title),
        summary = escape_html(item.summary_text()),
    )
}

pub fn render_simple_list_item(item: &NewsItem) -> String {
    format!(
        r#"
    <div class="flex items-start gap-3 py-2 border-b border-neutral-800/50 last:border-0">
        <div class="w-1.5 h-1.5 mt-2 rounded-full bg-neutral-500"></div>
        <div class="flex-1">
            <a href="{url}" target="_blank" class="text-sm text-neutral-300 hover:text-white transition-colors">{title}</a>
            <div class="text-[11px] text-neutral-500 mt-1">{meta}</div>
        </div>
    </div>
    "#,
        url = escape_html(link_href(&item.url)),
        title = escape_html(&item.title),
        meta = meta_line(&[item.summary_text(), &item.source, &item.time]),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendStyle {
    pub color: &'static str,
    pub icon: &'static str,
    pub arrow: &'static str,
}

pub fn trend_style(trend: &Trend) -> TrendStyle {
    match trend {
        Trend::Up => TrendStyle {
            color: "#34d399",
            icon: "trending-up",
            arrow: "▲",
        },
        Trend::Down => TrendStyle {
            color: "#f87171",
            icon: "trending-down",
            arrow: "▼",
        },
        Trend::Neutral | Trend::Other(_) => TrendStyle {
            color: "#a3a3a3",
            icon: "minus",
            arrow: "",
        },
    }
}

pub fn render_stock_row(item: &StockItem) -> String {
    let style = trend_style(&item.trend);
    format!(
        r#"
    <div class="flex items-center justify-between gap-3 py-2 border-b border-neutral-800/50 last:border-0" data-trend-icon="{icon}">
        <span class="mono text-xs text-neutral-300 w-16">{symbol}</span>
        <svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" class="opacity-80"><polyline fill="none" stroke="{color}" stroke-width="1.5" points="{points}" /></svg>
        <div class="text-right">
            <div class="mono text-xs text-neutral-200">{price}</div>
            <div class="mono text-[10px]" style="color:{color};">{arrow}{change}</div>
        </div>
    </div>
    "#,
        icon = style.icon,
        color = style.color,
        arrow = style.arrow,
        symbol = escape_html(&item.symbol),
        width = SPARKLINE_WIDTH,
        height = SPARKLINE_HEIGHT,
        points = sparkline(&item.trend),
        price = escape_html(&item.price),
        change = escape_html(&item.change),
    )
}

pub fn render_hacker_news_item(item: &HackerNewsItem) -> String {
    let points = if item.points.is_empty() {
        String::new()
    } else {
        format!(
            "<span class=\"mono text-[10px] text-orange-400\">{} points</span>",
            escape_html(&item.points)
        )
    };
    format!(
        r#"
    <div class="flex items-start justify-between gap-3 py-2 border-b border-neutral-800/50 last:border-0">
        <a href="{url}" target="_blank" class="text-sm text-neutral-300 hover:text-white transition-colors">{title}</a>
        {points}
    </div>
    "#,
        url = escape_html(link_href(&item.url)),
        title = escape_html(&item.title),
    )
}

pub fn render_github_trending_item(item: &GithubRepoItem) -> String {
    let url = if item.repo.is_empty() {
        "#".to_owned()
    } else {
        format!("https://github.com/{}", item.repo)
    };
    format!(
        r#"
    <div class="flex items-center justify-between gap-3 py-2 border-b border-neutral-800/50 last:border-0">
        <a href="{url}" target="_blank" class="mono text-xs text-neutral-300 hover:text-white transition-colors">{repo}</a>
        <div class="flex items-center gap-2">
            <span class="text-[10px] px-1.5 py-0.5 rounded border border-neutral-800 text-neutral-400">{lang}</span>
            <span class="mono text-[10px] text-yellow-400">★ {stars}</span>
        </div>
    </div>
    "#,
        url = escape_html(&url),
        repo = escape_html(&item.repo),
        lang = escape_html(&item.lang),
        stars = escape_html(&item.stars),
    )
}

/// Picks the hero illustration from a free-text keyword.
pub fn hero_image_url(keyword: &str) -> &'static str {
    let keyword = keyword.to_lowercase();
    if keyword.contains("dna") || keyword.contains("bio") {
        HERO_IMAGE_BIOTECH
    } else if keyword.contains("chip") || keyword.contains("nvidia") {
        HERO_IMAGE_SEMICONDUCTOR
    } else {
        HERO_IMAGE_GENERIC
    }
}

/// Decorative 7-point polyline, freshly randomized on every call.
pub fn sparkline(trend: &Trend) -> String {
    format_points(&sparkline_points(trend, &mut rand::rng()))
}

/// Random walk kept inside the vertical margins; only the final point
/// depends on the trend.
pub fn sparkline_points<R: Rng + ?Sized>(
    trend: &Trend,
    rng: &mut R,
) -> [(u32, u32); SPARKLINE_POINTS] {
    let low = SPARKLINE_MARGIN;
    let high = SPARKLINE_HEIGHT - SPARKLINE_MARGIN;
    let step_x = SPARKLINE_WIDTH / (SPARKLINE_POINTS as u32 - 1);

    let mut points = [(0, 0); SPARKLINE_POINTS];
    let mut y = rng.random_range(low..=high);
    points[0] = (0, y);

    for (idx, point) in points
        .iter_mut()
        .enumerate()
        .take(SPARKLINE_POINTS - 1)
        .skip(1)
    {
        let delta = rng.random_range(-4_i64..=4);
        y = (i64::from(y) + delta).clamp(i64::from(low), i64::from(high)) as u32;
        *point = (idx as u32 * step_x, y);
    }

    let final_y = match trend {
        Trend::Up => rng.random_range(low..low + SPARKLINE_BAND),
        Trend::Down => rng.random_range(high + 1 - SPARKLINE_BAND..=high),
        Trend::Neutral | Trend::Other(_) => rng.random_range(low..=high),
    };
    points[SPARKLINE_POINTS - 1] = (SPARKLINE_WIDTH, final_y);

    points
}

fn format_points(points: &[(u32, u32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn meta_line(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| escape_html(part))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Blank links point at `#` so the anchor stays inert.
pub fn link_href(url: &str) -> &str {
    let url = url.trim();
    if url.is_empty() { "#" } else { url }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
