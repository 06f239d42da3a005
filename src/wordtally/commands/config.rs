use crate::commands::{CmdMessage, CmdResult, TallyPaths};
use crate::config::TallyConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &TallyPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = TallyConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = TallyConfig::load(dir)?;
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
            let mut config = TallyConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            if key == "backend" {
                result.add_message(CmdMessage::info(
                    "Existing history is not moved between backends.",
                ));
            }
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::Backend;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_reports() {
        let temp = TempDir::new().unwrap();
        let paths = TallyPaths::new(temp.path());

        let result = run(
            &paths,
            ConfigAction::Set("extensions".into(), "md,org".into()),
        )
        .unwrap();

        assert_eq!(result.messages[0].content, "extensions set to .md,.org");
        let loaded = TallyConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.extensions, vec![".md", ".org"]);
    }

    #[test]
    fn set_backend_warns_about_existing_history() {
        let temp = TempDir::new().unwrap();
        let paths = TallyPaths::new(temp.path());

        let result = run(&paths, ConfigAction::Set("backend".into(), "settings".into())).unwrap();

        assert_eq!(result.config.unwrap().backend, Backend::Settings);
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn invalid_value_is_not_saved() {
        let temp = TempDir::new().unwrap();
        let paths = TallyPaths::new(temp.path());

        let result = run(&paths, ConfigAction::Set("backend".into(), "cloud".into())).unwrap();

        assert!(matches!(result.messages[0].level, MessageLevel::Error));
        assert!(!temp.path().join("config.json").exists());
    }

    #[test]
    fn show_unknown_key() {
        let temp = TempDir::new().unwrap();
        let paths = TallyPaths::new(temp.path());

        let result = run(&paths, ConfigAction::ShowKey("nope".into())).unwrap();

        assert!(matches!(result.messages[0].level, MessageLevel::Error));
    }
}
