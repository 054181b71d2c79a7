//! Config file lookup

use std::path::{Path, PathBuf};

use tale_core::world::{GameOptions, OptionsError};
use tracing::debug;

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tale");
    path.push("talerc");
    path
}

/// Load options from `explicit` if given, otherwise from the default path
/// when it exists. A missing default file yields the built-in defaults.
pub fn load_options(explicit: Option<&Path>) -> Result<GameOptions, OptionsError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return GameOptions::load_from_file(path);
    }

    let path = default_config_path();
    if path.exists() {
        debug!(path = %path.display(), "loading default config");
        GameOptions::load_from_file(&path)
    } else {
        Ok(GameOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_name() {
        let path = default_config_path();
        assert!(path.ends_with("tale/talerc"));
    }

    #[test]
    fn test_explicit_path() {
        let path = std::env::temp_dir().join(format!("tale-cli-rc-{}", std::process::id()));
        std::fs::write(&path, "OPTIONS=name:Moss,normal_interval:1000\n").unwrap();

        let options = load_options(Some(&path)).unwrap();
        assert_eq!(options.name, "Moss");
        assert_eq!(options.heartbeat.normal, 1000);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = load_options(Some(Path::new("/nonexistent/tale/talerc")));
        assert!(matches!(result, Err(OptionsError::IoError(_))));
    }
}
