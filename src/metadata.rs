//! Recovers `{date, hero, temp}` from archived pages.
//!
//! Matching is tied to the heading layout of the page template. Pages written
//! under an older layout degrade to sentinel values instead of failing.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::archive;
use crate::formats::ArchiveMetadata;

pub const UNKNOWN_DATE: &str = "未知日期";
pub const UNKNOWN_HERO: &str = "未知标题";

/// Class attribute of the element holding the temperature reading.
pub const TEMP_CLASS: &str = "weather-temp";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h1\b[^>]*>\s*([^<]+?)\s*</h1>").expect("date regex is valid")
});

static HERO_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h2\b[^>]*>\s*<a\b[^>]*>\s*([^<]+?)\s*</a>\s*</h2>")
        .expect("linked hero regex is valid")
});

static HERO_PLAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h2\b[^>]*>\s*([^<]+?)\s*</h2>").expect("plain hero regex is valid")
});

static TEMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?s)<(?:span|div)\b[^>]*\bclass="{TEMP_CLASS}"[^>]*>\s*([^<]*?)\s*</(?:span|div)>"#
    ))
    .expect("temperature regex is valid")
});

impl ArchiveMetadata {
    pub fn unknown() -> Self {
        Self {
            date: UNKNOWN_DATE.to_owned(),
            hero: UNKNOWN_HERO.to_owned(),
            temp: String::new(),
            degraded: true,
        }
    }
}

/// Metadata for one archive entry: the sidecar when it is readable, the
/// entry's markup otherwise.
pub fn load(entry_path: &Path) -> ArchiveMetadata {
    let sidecar_path = archive::sidecar_path(entry_path);
    if let Some(metadata) = read_sidecar(&sidecar_path) {
        tracing::debug!(entry = %entry_path.display(), "metadata from sidecar");
        return metadata;
    }
    tracing::debug!(entry = %entry_path.display(), "metadata from markup");
    extract(entry_path)
}

pub fn read_sidecar(path: &Path) -> Option<ArchiveMetadata> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(metadata) => Some(metadata),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable sidecar");
            None
        }
    }
}

/// Re-derives metadata from an archived page. Never fails: unreadable files
/// and unmatched headings produce sentinel values.
pub fn extract(path: &Path) -> ArchiveMetadata {
    let html = match std::fs::read_to_string(path) {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "cannot read archive entry");
            return ArchiveMetadata::unknown();
        }
    };

    let metadata = extract_from_html(&html);
    if metadata.degraded {
        tracing::warn!(path = %path.display(), "archive entry headings not found");
    }
    metadata
}

pub fn extract_from_html(html: &str) -> ArchiveMetadata {
    let date = first_capture(&DATE_RE, html);
    let hero = first_capture(&HERO_LINK_RE, html).or_else(|| first_capture(&HERO_PLAIN_RE, html));
    let temp = first_capture(&TEMP_RE, html).unwrap_or_default();

    ArchiveMetadata {
        degraded: date.is_none() || hero.is_none(),
        date: date.unwrap_or_else(|| UNKNOWN_DATE.to_owned()),
        hero: hero.unwrap_or_else(|| UNKNOWN_HERO.to_owned()),
        temp,
    }
}

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    let captures = re.captures(html)?;
    let text = unescape_html(captures.get(1)?.as_str().trim());
    (!text.is_empty()).then_some(text)
}

fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_linked_hero_before_plain_heading() {
        let html = r#"
            <h1 class="text-3xl">01月02日</h1>
            <h2 class="text-xl"><a href="https://example.com" target="_blank">Chips are back</a></h2>
            <h2>Second heading</h2>
            <span class="weather-temp">12°C</span>
        "#;
        let meta = extract_from_html(html);
        assert_eq!(meta.date, "01月02日");
        assert_eq!(meta.hero, "Chips are back");
        assert_eq!(meta.temp, "12°C");
        assert!(!meta.degraded);
    }

    #[test]
    fn falls_back_to_plain_heading() {
        let html = "<h1>01月03日</h1>\n<h2 class=\"x\">\n   Plain hero\n</h2>";
        let meta = extract_from_html(html);
        assert_eq!(meta.hero, "Plain hero");
        assert_eq!(meta.temp, "");
    }

    #[test]
    fn temperature_requires_exact_class() {
        let html = r#"<h1>d</h1><h2>h</h2><div class="weather-temp big">30</div><div class="weather-temp">21</div>"#;
        assert_eq!(extract_from_html(html).temp, "21");
    }

    #[test]
    fn escaped_text_round_trips() {
        let html = "<h1>d</h1><h2><a href=\"#\">AT&amp;T &lt;news&gt;</a></h2>";
        assert_eq!(extract_from_html(html).hero, "AT&T <news>");
    }

    #[test]
    fn empty_and_truncated_pages_degrade() {
        assert_eq!(extract_from_html(""), ArchiveMetadata::unknown());

        let truncated = extract_from_html("<html><body><h1>01月02日</h1><h2><a href=\"#\">Hal");
        assert_eq!(truncated.date, "01月02日");
        assert_eq!(truncated.hero, UNKNOWN_HERO);
        assert!(truncated.degraded);
    }

    #[test]
    fn unreadable_file_degrades() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let meta = extract(&temp.path().join("2024-01-02.html"));
        assert_eq!(meta, ArchiveMetadata::unknown());
        Ok(())
    }

    #[test]
    fn sidecar_wins_over_markup() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let entry = temp.path().join("2024-01-02.html");
        std::fs::write(&entry, "<h1>from markup</h1><h2>markup hero</h2>")?;
        assert_eq!(load(&entry).hero, "markup hero");

        std::fs::write(
            temp.path().join("2024-01-02.json"),
            r#"{"date": "01月02日", "hero": "sidecar hero", "temp": ""}"#,
        )?;
        assert_eq!(load(&entry).hero, "sidecar hero");

        std::fs::write(temp.path().join("2024-01-02.json"), "{ broken")?;
        assert_eq!(load(&entry).hero, "markup hero");
        Ok(())
    }
}
