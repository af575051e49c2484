use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The idol groups the archive is organised around.
///
/// This is a closed set: every stored card and playlist belongs to exactly one
/// of them. The "All" pseudo-category only exists on the filtering side, see
/// [`CategoryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Riize,
    #[serde(rename = "NCT127")]
    Nct127,
    XngHan,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Riize, Category::Nct127, Category::XngHan];

    /// Stable identifier, as stored on disk.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Riize => "Riize",
            Category::Nct127 => "NCT127",
            Category::XngHan => "XngHan",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Riize => "Riize",
            Category::Nct127 => "NCT 127",
            Category::XngHan => "XngHan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = squash(s);
        Category::ALL
            .into_iter()
            .find(|c| squash(c.id()) == key)
            .ok_or_else(|| {
                format!(
                    "Unknown category: {} (expected one of Riize, NCT127, XngHan)",
                    s
                )
            })
    }
}

/// Category selector used by views. `All` never ends up on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// The concrete category, if one is selected.
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if squash(s) == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Tag selector used by the gallery. A tag literally named "All" is still
/// selectable through `Only`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TagFilter {
    #[default]
    All,
    Only(String),
}

impl TagFilter {
    pub fn matches(&self, tags: &[String]) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Only(tag) => tags.iter().any(|t| t == tag),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::All => write!(f, "#All"),
            TagFilter::Only(tag) => write!(f, "#{}", tag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    Spotify,
    #[default]
    YouTube,
    #[serde(rename = "Apple Music")]
    AppleMusic,
    Other,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Spotify => "Spotify",
            Platform::YouTube => "YouTube Music",
            Platform::AppleMusic => "Apple Music",
            Platform::Other => "Other",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "spotify" => Ok(Platform::Spotify),
            "youtube" | "youtubemusic" | "yt" => Ok(Platform::YouTube),
            "applemusic" | "apple" => Ok(Platform::AppleMusic),
            "other" => Ok(Platform::Other),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// A single tagged image in the collection.
///
/// Everything but `tags` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photocard {
    pub id: String,
    pub url: String,
    pub title: String,
    pub category: Category,
    pub date_added: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Input for a card that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhotocard {
    pub url: String,
    pub title: String,
    pub category: Category,
    pub date_added: NaiveDate,
    pub tags: Vec<String>,
    pub memo: Option<String>,
}

impl NewPhotocard {
    pub fn new(url: impl Into<String>, title: impl Into<String>, category: Category) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            category,
            date_added: Utc::now().date_naive(),
            tags: Vec::new(),
            memo: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date_added = date;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub(crate) fn into_card(self, id: String) -> Photocard {
        Photocard {
            id,
            url: self.url,
            title: self.title,
            category: self.category,
            date_added: self.date_added,
            tags: self.tags,
            memo: self.memo,
        }
    }
}

/// A named link to a music playlist.
///
/// Older stored collections carry no `id`; one is assigned when they are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistLink {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub platform: Platform,
    pub category: Category,
}

impl PlaylistLink {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        platform: Platform,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: url.into(),
            platform,
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Index of the neighbour `position` swaps with, if it exists in `0..len`.
    pub fn neighbour(&self, position: usize, len: usize) -> Option<usize> {
        let target = match self {
            Direction::Up => position.checked_sub(1)?,
            Direction::Down => position + 1,
        };
        (target < len).then_some(target)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: {} (expected up or down)", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// The four top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Index,
    Gallery,
    Music,
    Media,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Index, Tab::Gallery, Tab::Music, Tab::Media];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Index => "Home",
            Tab::Gallery => "Cards",
            Tab::Music => "Music",
            Tab::Media => "Media",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_loosely() {
        assert_eq!("riize".parse::<Category>().unwrap(), Category::Riize);
        assert_eq!("NCT 127".parse::<Category>().unwrap(), Category::Nct127);
        assert_eq!("nct127".parse::<Category>().unwrap(), Category::Nct127);
        assert_eq!("XNGHAN".parse::<Category>().unwrap(), Category::XngHan);
        assert!("exo".parse::<Category>().is_err());
    }

    #[test]
    fn category_filter_parses_all() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "riize".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Riize)
        );
    }

    #[test]
    fn category_serializes_by_id() {
        let json = serde_json::to_string(&Category::Nct127).unwrap();
        assert_eq!(json, "\"NCT127\"");
    }

    #[test]
    fn photocard_reads_reference_shape() {
        let json = r#"{
            "id": "1",
            "url": "https://example.com/a.jpg",
            "title": "Riize Official",
            "category": "Riize",
            "dateAdded": "2024-01-15"
        }"#;
        let card: Photocard = serde_json::from_str(json).unwrap();
        assert_eq!(card.date_added, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(card.tags.is_empty());
        assert_eq!(card.memo, None);

        let out = serde_json::to_value(&card).unwrap();
        assert_eq!(out["dateAdded"], "2024-01-15");
        assert!(out.get("memo").is_none());
    }

    #[test]
    fn playlist_without_id_gets_one() {
        let json = r#"{"name":"A","url":"https://x","platform":"Apple Music","category":"XngHan"}"#;
        let link: PlaylistLink = serde_json::from_str(json).unwrap();
        assert_eq!(link.platform, Platform::AppleMusic);
        assert!(!link.id.is_nil());
    }

    #[test]
    fn neighbour_stays_in_bounds() {
        assert_eq!(Direction::Up.neighbour(0, 3), None);
        assert_eq!(Direction::Up.neighbour(2, 3), Some(1));
        assert_eq!(Direction::Down.neighbour(2, 3), None);
        assert_eq!(Direction::Down.neighbour(0, 3), Some(1));
    }

    #[test]
    fn tag_filter_is_exact() {
        let tags = vec!["Anton".to_string()];
        assert!(TagFilter::Only("Anton".into()).matches(&tags));
        assert!(!TagFilter::Only("anton".into()).matches(&tags));
        assert!(TagFilter::All.matches(&[]));
    }
}
