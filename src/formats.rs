use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SESSION_ID: &str = "SESS-GEN";
pub const DEFAULT_HERO_TITLE: &str = "暂无关键事件";

/// One day's input record. Every field is optional in the JSON document.
///
/// Keys are camelCase; the snake_case spelling written by older data
/// producers is accepted as an alias. `null` counts as absent, and a list
/// entry that cannot be read is dropped on its own without failing the rest
/// of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(alias = "session_id", deserialize_with = "scalar_as_string")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub weather: Weather,
    #[serde(alias = "hero_news", deserialize_with = "null_as_default")]
    pub hero_news: HeroNews,
    #[serde(deserialize_with = "lenient_list")]
    pub themes: Vec<String>,

    #[serde(deserialize_with = "lenient_list")]
    pub actions: Vec<ActionItem>,
    #[serde(deserialize_with = "lenient_list")]
    pub signals: Vec<NewsItem>,
    #[serde(deserialize_with = "lenient_list")]
    pub important: Vec<NewsItem>,
    #[serde(deserialize_with = "lenient_list")]
    pub save: Vec<NewsItem>,
    #[serde(deserialize_with = "lenient_list")]
    pub ignore: Vec<NewsItem>,
    #[serde(alias = "agent_news", deserialize_with = "lenient_list")]
    pub agent_news: Vec<NewsItem>,
    #[serde(alias = "tech_news", deserialize_with = "lenient_list")]
    pub tech_news: Vec<NewsItem>,
    #[serde(alias = "secondary_news", deserialize_with = "lenient_list")]
    pub secondary_news: Vec<NewsItem>,
    #[serde(deserialize_with = "lenient_list")]
    pub stocks: Vec<StockItem>,
    #[serde(alias = "hacker_news", deserialize_with = "lenient_list")]
    pub hacker_news: Vec<HackerNewsItem>,
    #[serde(alias = "github_trending", deserialize_with = "lenient_list")]
    pub github_trending: Vec<GithubRepoItem>,
}

impl Snapshot {
    /// Session id as shown on the page; blank ids fall back to
    /// [`DEFAULT_SESSION_ID`].
    pub fn display_session_id(&self) -> &str {
        let session_id = self.session_id.trim();
        if session_id.is_empty() {
            DEFAULT_SESSION_ID
        } else {
            session_id
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            session_id: DEFAULT_SESSION_ID.to_owned(),
            weather: Weather::default(),
            hero_news: HeroNews::default(),
            themes: Vec::new(),
            actions: Vec::new(),
            signals: Vec::new(),
            important: Vec::new(),
            save: Vec::new(),
            ignore: Vec::new(),
            agent_news: Vec::new(),
            tech_news: Vec::new(),
            secondary_news: Vec::new(),
            stocks: Vec::new(),
            hacker_news: Vec::new(),
            github_trending: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    #[serde(deserialize_with = "scalar_as_string")]
    pub city: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub temp: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub cond: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub advice: String,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            city: "--".to_owned(),
            temp: "--".to_owned(),
            cond: "--".to_owned(),
            advice: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroNews {
    #[serde(deserialize_with = "scalar_as_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub source: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub summary: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub takeaway: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub url: String,
    #[serde(alias = "image_keyword", deserialize_with = "scalar_as_string")]
    pub image_keyword: String,
}

impl HeroNews {
    /// Headline as rendered into the page heading. Blank titles fall back to
    /// [`DEFAULT_HERO_TITLE`] so the heading is never empty.
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            DEFAULT_HERO_TITLE
        } else {
            title
        }
    }
}

impl Default for HeroNews {
    fn default() -> Self {
        Self {
            title: DEFAULT_HERO_TITLE.to_owned(),
            source: String::new(),
            summary: String::new(),
            takeaway: String::new(),
            url: "#".to_owned(),
            image_keyword: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
    Other(String),
}

impl Priority {
    /// Label shown on the card. Unknown values are shown as medium, matching
    /// the palette they fall back to.
    pub fn label(&self) -> &str {
        match self {
            Self::High => "高",
            Self::Low => "低",
            Self::Medium | Self::Other(_) => "中",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        let known = match value.trim() {
            "高" => Some(Self::High),
            "中" => Some(Self::Medium),
            "低" => Some(Self::Low),
            _ => None,
        };
        known.unwrap_or(Self::Other(value))
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Other(raw) => raw,
            known => known.label().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    #[serde(deserialize_with = "scalar_as_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub detail: String,
    #[serde(deserialize_with = "scalar_or")]
    pub priority: Priority,
}

/// Shared shape for signals, important cards and the plain news lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    #[serde(deserialize_with = "scalar_as_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub detail: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub summary: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub source: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub time: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub url: String,
}

impl NewsItem {
    /// `detail` first, then `summary`.
    pub fn detail_text(&self) -> &str {
        if self.detail.is_empty() {
            &self.summary
        } else {
            &self.detail
        }
    }

    /// `summary` first, then `detail`.
    pub fn summary_text(&self) -> &str {
        if self.summary.is_empty() {
            &self.detail
        } else {
            &self.summary
        }
    }
}

impl Default for NewsItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            detail: String::new(),
            summary: String::new(),
            source: String::new(),
            time: String::new(),
            url: "#".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Neutral,
    Other(String),
}

impl From<String> for Trend {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "neutral" => Self::Neutral,
            _ => Self::Other(value),
        }
    }
}

impl From<Trend> for String {
    fn from(value: Trend) -> Self {
        match value {
            Trend::Up => "up".to_owned(),
            Trend::Down => "down".to_owned(),
            Trend::Neutral => "neutral".to_owned(),
            Trend::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockItem {
    #[serde(deserialize_with = "scalar_as_string")]
    pub symbol: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub price: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub change: String,
    #[serde(deserialize_with = "scalar_or")]
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HackerNewsItem {
    #[serde(deserialize_with = "scalar_as_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub url: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub points: String,
}

impl Default for HackerNewsItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: "#".to_owned(),
            points: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubRepoItem {
    #[serde(deserialize_with = "scalar_as_string")]
    pub repo: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub lang: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub stars: String,
}

/// Summary of one archive entry, as shown on the archive index.
///
/// Written next to each archive entry as a JSON sidecar and re-derived from
/// the entry's markup when the sidecar is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub date: String,
    pub hero: String,
    #[serde(default)]
    pub temp: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

/// Producers sometimes emit prices, points and star counts as JSON numbers,
/// and `null` for fields they have nothing for.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .unwrap_or_default())
}

/// Like [`scalar_as_string`], but `null` keeps the type's own default
/// (medium priority, neutral trend).
fn scalar_or<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(|scalar| T::from(scalar.into_string()))
        .unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a list entry by entry, dropping entries that do not fit the item
/// shape. A `null` or non-list value is an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(values) => values,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(value = %other, "expected a list; treating it as empty");
            return Ok(Vec::new());
        }
    };

    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(index = idx, %err, "skipping unreadable list entry");
                None
            }
        })
        .collect())
}
