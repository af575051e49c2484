use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::media::{read_image_file, Camera, CaptureSession};
use crate::model::{Category, CategoryFilter, NewPhotocard};
use crate::store::photocards::PhotocardStore;
use crate::store::PersistenceAdapter;
use crate::tags::{with_tag, without_tag};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const CAPTURE_TITLE: &str = "New Capture";

/// Category for a new card: the gallery's current one, or `fallback` under "All".
pub fn category_for_new_card(filter: CategoryFilter, fallback: Category) -> Category {
    filter.category().unwrap_or(fallback)
}

fn id_at<B: PersistenceAdapter>(store: &PhotocardStore<B>, index: DisplayIndex) -> Option<String> {
    let id = store
        .snapshot()
        .get(index.position())
        .map(|c| c.id.clone());
    if id.is_none() {
        debug!(%index, "no card at index");
    }
    id
}

pub fn upload<B: PersistenceAdapter>(
    store: &mut PhotocardStore<B>,
    path: &Path,
    category: Category,
) -> Result<CmdResult> {
    let uploaded = read_image_file(path)?;
    let card = store.add(NewPhotocard::new(uploaded.url, uploaded.title, category));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added \"{}\" to {}",
        card.title,
        card.category.label()
    )));
    result.note_sync(store.last_sync_ok());
    result.affected_cards.push(card);
    Ok(result)
}

pub fn capture<B: PersistenceAdapter, C: Camera>(
    store: &mut PhotocardStore<B>,
    camera: &mut C,
    category: Category,
    quality: u8,
    cancel: CancellationToken,
) -> Result<CmdResult> {
    let session = CaptureSession::open_with_token(camera, cancel)?;
    let mut result = CmdResult::default();

    let Some(url) = session.capture(quality)? else {
        result.add_message(CmdMessage::info("Capture cancelled."));
        return Ok(result);
    };

    let card = store.add(NewPhotocard::new(url, CAPTURE_TITLE, category));
    result.add_message(CmdMessage::success(format!(
        "Captured a new card for {}",
        card.category.label()
    )));
    result.note_sync(store.last_sync_ok());
    result.affected_cards.push(card);
    Ok(result)
}

/// Remove the card shown at `index`. Nothing happens if there is none.
pub fn delete<B: PersistenceAdapter>(
    store: &mut PhotocardStore<B>,
    index: DisplayIndex,
) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(removed) = id_at(store, index).and_then(|id| store.delete(&id)) else {
        return result;
    };
    result.add_message(CmdMessage::success(format!(
        "Card deleted ({}): {}",
        index, removed.title
    )));
    result.note_sync(store.last_sync_ok());
    result.affected_cards.push(removed);
    result
}

pub fn tag<B: PersistenceAdapter>(
    store: &mut PhotocardStore<B>,
    index: DisplayIndex,
    raw: &str,
) -> CmdResult {
    edit_tags(store, index, raw, TagEdit::Add)
}

pub fn untag<B: PersistenceAdapter>(
    store: &mut PhotocardStore<B>,
    index: DisplayIndex,
    raw: &str,
) -> CmdResult {
    edit_tags(store, index, raw, TagEdit::Remove)
}

#[derive(Clone, Copy)]
enum TagEdit {
    Add,
    Remove,
}

fn edit_tags<B: PersistenceAdapter>(
    store: &mut PhotocardStore<B>,
    index: DisplayIndex,
    raw: &str,
    edit: TagEdit,
) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(card) = id_at(store, index).and_then(|id| store.get(&id).cloned()) else {
        return result;
    };

    let next = match edit {
        TagEdit::Add => with_tag(&card.tags, raw),
        TagEdit::Remove => without_tag(&card.tags, raw),
    };

    match next {
        Err(e) => result.add_message(CmdMessage::error(format!("Invalid tag: {}", e))),
        Ok(None) => {
            let note = match edit {
                TagEdit::Add => "already has that tag",
                TagEdit::Remove => "does not have that tag",
            };
            result.add_message(CmdMessage::info(format!("{} {}", card.title, note)));
        }
        Ok(Some(tags)) => {
            store.update_tags(&card.id, tags);
            result.note_sync(store.last_sync_ok());
            if let Some(updated) = store.get(&card.id) {
                result.add_message(CmdMessage::success(format!(
                    "Tags for {}: {}",
                    updated.title,
                    format_tags(&updated.tags)
                )));
                result.affected_cards.push(updated.clone());
            }
        }
    }
    result
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "(none)".to_string();
    }
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}
