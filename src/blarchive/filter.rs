//! Read-only queries over store snapshots.
//!
//! Nothing here mutates or persists. The gallery narrows by category first and
//! by tag second; the tag facet is computed from the category-narrowed set, so
//! choosing a category also narrows which tags are on offer.

use crate::model::{CategoryFilter, Photocard, PlaylistLink, TagFilter};
use std::collections::BTreeSet;

pub fn by_category(snapshot: &[Photocard], category: CategoryFilter) -> Vec<Photocard> {
    snapshot
        .iter()
        .filter(|c| category.matches(c.category))
        .cloned()
        .collect()
}

/// Distinct tags across `snapshot`, sorted ascending.
pub fn available_tags(snapshot: &[Photocard]) -> Vec<String> {
    snapshot
        .iter()
        .flat_map(|c| c.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn by_tag(snapshot: &[Photocard], tag: &TagFilter) -> Vec<Photocard> {
    snapshot
        .iter()
        .filter(|c| tag.matches(&c.tags))
        .cloned()
        .collect()
}

/// A playlist together with its position in the full collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedPlaylist {
    pub position: usize,
    pub link: PlaylistLink,
}

pub fn playlists_by_category(
    snapshot: &[PlaylistLink],
    category: CategoryFilter,
) -> Vec<PositionedPlaylist> {
    snapshot
        .iter()
        .enumerate()
        .filter(|(_, l)| category.matches(l.category))
        .map(|(position, link)| PositionedPlaylist {
            position,
            link: link.clone(),
        })
        .collect()
}

/// Gallery selection state: the active category and tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GallerySelection {
    category: CategoryFilter,
    tag: TagFilter,
}

/// What the gallery shows for a given selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub category: CategoryFilter,
    pub tag: TagFilter,
    pub available_tags: Vec<String>,
    pub cards: Vec<Photocard>,
}

impl GallerySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn tag(&self) -> &TagFilter {
        &self.tag
    }

    /// Switch category. The tag selection always goes back to All, since the
    /// new category may not offer it.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.tag = TagFilter::All;
    }

    pub fn select_tag(&mut self, tag: TagFilter) {
        self.tag = tag;
    }

    pub fn apply(&self, snapshot: &[Photocard]) -> GalleryView {
        let in_category = by_category(snapshot, self.category);
        let available_tags = available_tags(&in_category);
        let cards = by_tag(&in_category, &self.tag);
        GalleryView {
            category: self.category,
            tag: self.tag.clone(),
            available_tags,
            cards,
        }
    }
}
