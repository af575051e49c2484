use super::backend::PersistenceAdapter;
use crate::error::{ArchiveError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each key as `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(ArchiveError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ArchiveError::Io)?;
        }
        Ok(())
    }
}

impl PersistenceAdapter for FsBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ArchiveError::Io)?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let target = self.path_for(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, blob).map_err(ArchiveError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(ArchiveError::Io(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let backend = FsBackend::new(PathBuf::from("/tmp/blarchive-test"));
        assert!(backend.path_for("../etc").is_err());
        assert!(backend.path_for("").is_err());
        assert!(backend.path_for(".hidden").is_err());
        assert!(backend.path_for("blarchive_playlists").is_ok());
    }
}
