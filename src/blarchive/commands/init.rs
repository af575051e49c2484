use crate::commands::{ArchivePaths, CmdMessage, CmdResult};
use crate::config::ArchiveConfig;
use crate::error::Result;
use crate::store::photocards::PhotocardStore;
use crate::store::playlists::PlaylistStore;
use crate::store::PersistenceAdapter;
use std::fs;

/// Create the data directory and write out both collections and the config,
/// so the archive exists on disk before the first edit.
pub fn run<B: PersistenceAdapter>(
    paths: &ArchivePaths,
    cards: &mut PhotocardStore<B>,
    playlists: &mut PlaylistStore<B>,
    config: &ArchiveConfig,
) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    fs::create_dir_all(dir)?;
    if !dir.join("config.json").exists() {
        config.save(dir)?;
    }

    let mut result = CmdResult::default();
    let synced = cards.flush() & playlists.flush();
    result.note_sync(synced);
    result.add_message(CmdMessage::success(format!(
        "Initialized blarchive at {} ({} cards, {} playlists)",
        dir.display(),
        cards.len(),
        playlists.len()
    )));
    Ok(result)
}
