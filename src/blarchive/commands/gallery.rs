use crate::commands::{CmdResult, GalleryFacets};
use crate::filter::GallerySelection;
use crate::index::index_cards;
use crate::model::{Photocard, Tab};

/// List the cards matching `selection`, numbered by their place in the full
/// collection.
pub fn run(snapshot: &[Photocard], selection: &GallerySelection) -> CmdResult {
    let view = selection.apply(snapshot);
    let mut result = CmdResult::for_tab(Tab::Gallery);
    result.facets = Some(GalleryFacets {
        category: view.category,
        tag: view.tag,
        available_tags: view.available_tags,
    });
    result.listed_cards = index_cards(snapshot, view.cards);
    result
}
