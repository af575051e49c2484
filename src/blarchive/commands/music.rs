use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArchiveError, Result};
use crate::filter::playlists_by_category;
use crate::index::{DisplayIndex, DisplayPlaylist};
use crate::model::{Category, CategoryFilter, Direction, Platform, PlaylistLink, Tab};
use crate::store::playlists::PlaylistStore;
use crate::store::PersistenceAdapter;
use reqwest::Url;
use tracing::debug;
use uuid::Uuid;

pub fn list(snapshot: &[PlaylistLink], category: CategoryFilter) -> CmdResult {
    let mut result = CmdResult::for_tab(Tab::Music);
    result.listed_playlists = playlists_by_category(snapshot, category)
        .into_iter()
        .map(DisplayPlaylist::from)
        .collect();
    result
}

pub fn add<B: PersistenceAdapter>(
    store: &mut PlaylistStore<B>,
    name: &str,
    url: &str,
    platform: Platform,
    category: Category,
) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ArchiveError::Api("Playlist name cannot be empty".to_string()));
    }
    let url = url.trim();
    Url::parse(url).map_err(|e| ArchiveError::Api(format!("Invalid playlist URL {}: {}", url, e)))?;

    let link = store.add(PlaylistLink::new(name, url, platform, category));
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} ({}) to {}",
        link.name,
        link.platform.label(),
        link.category.label()
    )));
    result.note_sync(store.last_sync_ok());
    result.affected_playlists.push(link);
    Ok(result)
}

/// Id of the link currently listed at `index`.
fn id_at<B: PersistenceAdapter>(store: &PlaylistStore<B>, index: DisplayIndex) -> Option<Uuid> {
    let id = store.snapshot().get(index.position()).map(|l| l.id);
    if id.is_none() {
        debug!(%index, "no playlist at index");
    }
    id
}

pub fn delete<B: PersistenceAdapter>(store: &mut PlaylistStore<B>, index: DisplayIndex) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(removed) = id_at(store, index).and_then(|id| store.delete(&id)) else {
        return result;
    };
    result.add_message(CmdMessage::success(format!("Removed {}", removed.name)));
    result.note_sync(store.last_sync_ok());
    result.affected_playlists.push(removed);
    result
}

pub fn move_link<B: PersistenceAdapter>(
    store: &mut PlaylistStore<B>,
    index: DisplayIndex,
    direction: Direction,
) -> CmdResult {
    let mut result = CmdResult::default();
    let Some(id) = id_at(store, index) else {
        return result;
    };
    if !store.move_by_id(&id, direction) {
        let edge = match direction {
            Direction::Up => "first",
            Direction::Down => "last",
        };
        result.add_message(CmdMessage::info(format!("Playlist {} is already {}", index, edge)));
        return result;
    }
    result.note_sync(store.last_sync_ok());
    let Some(position) = store.position_of(&id) else {
        return result;
    };
    let link = store.snapshot()[position].clone();
    result.add_message(CmdMessage::success(format!(
        "Moved {} {} to {}",
        link.name,
        direction,
        DisplayIndex::from_position(position)
    )));
    result.affected_playlists.push(link);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;
    use std::rc::Rc;

    fn seeded() -> PlaylistStore<MemBackend> {
        PlaylistStore::load(Rc::new(MemBackend::new()))
    }

    fn index(n: &str) -> DisplayIndex {
        n.parse().unwrap()
    }

    fn names<B: PersistenceAdapter>(store: &PlaylistStore<B>) -> Vec<&str> {
        store.snapshot().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn filtered_list_keeps_global_numbers() {
        let store = seeded();
        let result = list(store.snapshot(), Category::Nct127.into());
        assert_eq!(result.listed_playlists.len(), 1);
        assert_eq!(result.listed_playlists[0].index.to_string(), "2");
        assert_eq!(result.tab, Some(Tab::Music));
    }

    #[test]
    fn add_appends() {
        let mut store = seeded();
        add(
            &mut store,
            " Night Drive ",
            "https://open.spotify.com/playlist/abc",
            Platform::Spotify,
            Category::XngHan,
        )
        .unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshot()[2].name, "Night Drive");
    }

    #[test]
    fn add_rejects_blank_name_and_bad_url() {
        let mut store = seeded();
        assert!(add(&mut store, "  ", "https://x.test", Platform::Other, Category::Riize).is_err());
        assert!(add(&mut store, "n", "not a url", Platform::Other, Category::Riize).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn move_up_swaps_with_previous() {
        let mut store = seeded();
        let result = move_link(&mut store, index("2"), Direction::Up);
        assert_eq!(names(&store), vec!["NCT 127 - WALK", "Riize - RIIZING"]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn move_past_edge_is_a_no_op() {
        let mut store = seeded();
        let result = move_link(&mut store, index("1"), Direction::Up);
        assert_eq!(names(&store), vec!["Riize - RIIZING", "NCT 127 - WALK"]);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn delete_missing_index_is_silent() {
        let mut store = seeded();
        assert!(delete(&mut store, index("5")).messages.is_empty());
        assert_eq!(store.len(), 2);

        delete(&mut store, index("1"));
        assert_eq!(names(&store), vec!["NCT 127 - WALK"]);
    }
}
