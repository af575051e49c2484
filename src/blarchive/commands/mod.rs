use crate::caption::CaptionOutcome;
use crate::config::ArchiveConfig;
use crate::index::{DisplayCard, DisplayPlaylist};
use crate::model::{Category, CategoryFilter, Photocard, PlaylistLink, Tab, TagFilter};
use crate::seed::MediaLinks;
use std::path::PathBuf;

pub mod caption;
pub mod cards;
pub mod config;
pub mod gallery;
pub mod home;
pub mod init;
pub mod media;
pub mod music;

#[derive(Debug, Clone)]
pub struct ArchivePaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Active gallery filters and the tags on offer under them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryFacets {
    pub category: CategoryFilter,
    pub tag: TagFilter,
    pub available_tags: Vec<String>,
}

/// Per-group counts for the index view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub cards: usize,
    pub playlists: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub tab: Option<Tab>,
    pub affected_cards: Vec<Photocard>,
    pub listed_cards: Vec<DisplayCard>,
    pub facets: Option<GalleryFacets>,
    pub affected_playlists: Vec<PlaylistLink>,
    pub listed_playlists: Vec<DisplayPlaylist>,
    pub summaries: Vec<CategorySummary>,
    pub media: Vec<(Category, MediaLinks)>,
    pub caption: Option<CaptionOutcome>,
    pub config: Option<ArchiveConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn for_tab(tab: Tab) -> Self {
        Self {
            tab: Some(tab),
            ..Self::default()
        }
    }

    pub fn with_config(mut self, config: ArchiveConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Warn when the last write did not reach storage.
    pub(crate) fn note_sync(&mut self, synced: bool) {
        if !synced {
            self.add_message(CmdMessage::warning(
                "Could not save to storage; this change only lasts until exit.",
            ));
        }
    }
}
