//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! archive operation, whatever the front end.
//!
//! The facade:
//! - **Owns** both stores, bootstrapped from one shared backend
//! - **Normalizes inputs** (listing numbers, category and tag strings)
//! - **Dispatches** to `commands/*.rs` and returns `Result<CmdResult>`
//!
//! It never prints, never prompts and never decides presentation.
//!
//! `ArchiveApi<B: PersistenceAdapter>` is generic over storage:
//! - Production: `ArchiveApi<FsBackend>`
//! - Testing: `ArchiveApi<MemBackend>`

use crate::caption::CaptionClient;
use crate::commands;
use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, Result};
use crate::filter::GallerySelection;
use crate::index::DisplayIndex;
use crate::media::Camera;
use crate::model::{Category, CategoryFilter, Direction, Platform, TagFilter};
use crate::store::photocards::PhotocardStore;
use crate::store::playlists::PlaylistStore;
use crate::store::PersistenceAdapter;
use crate::tags::normalize_tag;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

pub struct ArchiveApi<B: PersistenceAdapter> {
    cards: PhotocardStore<B>,
    playlists: PlaylistStore<B>,
    config: ArchiveConfig,
    paths: commands::ArchivePaths,
}

impl<B: PersistenceAdapter> ArchiveApi<B> {
    /// Bootstrap both collections from `backend`.
    pub fn new(backend: B, config: ArchiveConfig, paths: commands::ArchivePaths) -> Self {
        let backend = Rc::new(backend);
        Self {
            cards: PhotocardStore::load(Rc::clone(&backend)),
            playlists: PlaylistStore::load(backend),
            config,
            paths,
        }
    }

    pub fn home(&self) -> commands::CmdResult {
        commands::home::run(self.cards.snapshot(), self.playlists.snapshot())
    }

    /// Gallery listing. A blank or `#`-only tag means no tag filter.
    pub fn gallery(&self, category: CategoryFilter, tag: Option<&str>) -> commands::CmdResult {
        let mut selection = GallerySelection::new();
        selection.select_category(category);
        if let Some(tag) = tag.and_then(|raw| normalize_tag(raw).ok()) {
            selection.select_tag(TagFilter::Only(tag));
        }
        commands::gallery::run(self.cards.snapshot(), &selection)
    }

    pub fn music(&self, category: CategoryFilter) -> commands::CmdResult {
        commands::music::list(self.playlists.snapshot(), category)
    }

    pub fn media(&self) -> commands::CmdResult {
        commands::media::run()
    }

    /// Add an image file as a card. Under `All` the configured default
    /// category is used.
    pub fn upload(&mut self, path: &Path, category: CategoryFilter) -> Result<commands::CmdResult> {
        let category =
            commands::cards::category_for_new_card(category, self.config.default_category);
        commands::cards::upload(&mut self.cards, path, category)
    }

    pub fn capture<C: Camera>(
        &mut self,
        camera: &mut C,
        category: CategoryFilter,
        cancel: CancellationToken,
    ) -> Result<commands::CmdResult> {
        let category =
            commands::cards::category_for_new_card(category, self.config.default_category);
        commands::cards::capture(
            &mut self.cards,
            camera,
            category,
            self.config.jpeg_quality,
            cancel,
        )
    }

    pub fn delete_card(&mut self, index: &str) -> Result<commands::CmdResult> {
        let index = parse_index(index)?;
        Ok(commands::cards::delete(&mut self.cards, index))
    }

    pub fn tag_card(&mut self, index: &str, tag: &str) -> Result<commands::CmdResult> {
        let index = parse_index(index)?;
        Ok(commands::cards::tag(&mut self.cards, index, tag))
    }

    pub fn untag_card(&mut self, index: &str, tag: &str) -> Result<commands::CmdResult> {
        let index = parse_index(index)?;
        Ok(commands::cards::untag(&mut self.cards, index, tag))
    }

    pub fn add_playlist(
        &mut self,
        name: &str,
        url: &str,
        platform: Platform,
        category: Category,
    ) -> Result<commands::CmdResult> {
        commands::music::add(&mut self.playlists, name, url, platform, category)
    }

    pub fn delete_playlist(&mut self, index: &str) -> Result<commands::CmdResult> {
        let index = parse_index(index)?;
        Ok(commands::music::delete(&mut self.playlists, index))
    }

    pub fn move_playlist(&mut self, index: &str, direction: Direction) -> Result<commands::CmdResult> {
        let index = parse_index(index)?;
        Ok(commands::music::move_link(&mut self.playlists, index, direction))
    }

    pub async fn caption(&self, category: Category) -> Result<commands::CmdResult> {
        let client = CaptionClient::from_config(&self.config)?;
        Ok(commands::caption::run(&client, category).await)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, &mut self.cards, &mut self.playlists, &self.config)
    }

    pub fn cards(&self) -> &PhotocardStore<B> {
        &self.cards
    }

    pub fn playlists(&self) -> &PlaylistStore<B> {
        &self.playlists
    }

    pub fn settings(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn paths(&self) -> &commands::ArchivePaths {
        &self.paths
    }
}

fn parse_index(input: &str) -> Result<DisplayIndex> {
    DisplayIndex::from_str(input).map_err(ArchiveError::Api)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{ArchivePaths, CmdMessage, CmdResult, MessageLevel};
