use crate::commands::{ArchivePaths, CmdMessage, CmdResult};
use crate::config::ArchiveConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Run a config action. On a successful `Set` the saved config is returned
/// in the result so callers can pick it up without reloading.
pub fn run(paths: &ArchivePaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = ArchiveConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = ArchiveConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = ArchiveConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Category;

    fn paths() -> (tempfile::TempDir, ArchivePaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArchivePaths {
            data_dir: dir.path().to_path_buf(),
        };
        (dir, paths)
    }

    #[test]
    fn set_then_show() {
        let (_dir, paths) = paths();
        let set = run(
            &paths,
            ConfigAction::Set("default-category".into(), "xngHan".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].content, "default-category set to XngHan");
        assert_eq!(set.config.unwrap().default_category, Category::XngHan);

        let shown = run(&paths, ConfigAction::ShowKey("default-category".into())).unwrap();
        assert_eq!(shown.messages[0].content, "XngHan");
    }

    #[test]
    fn bad_value_is_reported_not_saved() {
        let (dir, paths) = paths();
        let res = run(
            &paths,
            ConfigAction::Set("jpeg-quality".into(), "250".into()),
        )
        .unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
        assert!(res.config.is_none());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let (_dir, paths) = paths();
        let res = run(&paths, ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
    }
}
