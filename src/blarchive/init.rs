use crate::api::{ArchiveApi, ArchivePaths};
use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, Result};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "BLARCHIVE_HOME";

/// Pick the data directory: an explicit path wins, then `BLARCHIVE_HOME`,
/// then the platform data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "blarchive", "blarchive")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ArchiveError::Store("Could not determine a data directory".to_string()))
}

/// Load config and both collections from `data_dir`.
///
/// A config file that cannot be read is ignored in favour of defaults, the
/// same way unreadable collections fall back to the built-in seed.
pub fn initialize(data_dir: PathBuf) -> ArchiveApi<FsBackend> {
    debug!(data_dir = %data_dir.display(), "opening archive");
    let config = ArchiveConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config");
        ArchiveConfig::default()
    });

    let backend = FsBackend::new(data_dir.clone());
    ArchiveApi::new(backend, config, ArchivePaths { data_dir })
}
