//! Configuration, log and engine registry paths

use std::path::{Path, PathBuf};

/// Name used for the per-user config and data directories
const APP_NAME: &str = "utw";

/// Per-project configuration file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "utw.json";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/utw/`
/// - macOS: `~/Library/Application Support/utw/`
/// - Windows: `%APPDATA%\utw\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the user configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the path to the log directory
pub fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("logs"))
}

/// Get the path to the project configuration file inside `dir`
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(PROJECT_CONFIG_FILE)
}

/// Location of the launcher's `Install.ini`, which maps engine associations
/// to installation directories on macOS and Linux
pub fn engine_install_ini() -> Option<PathBuf> {
    let home = directories::BaseDirs::new()?.home_dir().to_path_buf();

    if cfg!(target_os = "macos") {
        Some(
            home.join("Library")
                .join("Application Support")
                .join("Epic")
                .join("UnrealEngine")
                .join("Install.ini"),
        )
    } else {
        Some(
            home.join(".config")
                .join("Epic")
                .join("UnrealEngine")
                .join("Install.ini"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn test_project_config_path() {
        let path = project_config_path(Path::new("/game"));
        assert_eq!(path, PathBuf::from("/game/utw.json"));
    }
}
