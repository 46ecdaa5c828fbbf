//! Configuration file handling
//!
//! Settings are layered: command line flags win over the project's
//! `utw.json`, which wins over the user's `config.toml`, which wins over the
//! built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{config_path, project_config_path};
use super::{Error, Result};
use crate::commands::RunArgs;
use crate::engine::BuildConfiguration;

/// User configuration (`config.toml` in the platform config directory)
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Default settings
#[derive(Debug, Deserialize, Default)]
pub struct Defaults {
    /// Build configuration used when neither the flag nor the project sets one
    pub build_configuration: Option<BuildConfiguration>,

    /// Engine installation used when neither the flag nor the project sets one
    pub engine_dir: Option<PathBuf>,
}

/// Output settings
#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// Colorize the report
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file, defaulting if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        toml::from_str(&content).map_err(|e| Error::config_parse(path, e))
    }
}

/// Per-project configuration (`utw.json` in the working directory)
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub build_configuration: Option<BuildConfiguration>,
    /// Relative paths are resolved against the directory holding `utw.json`
    pub project_dir: Option<PathBuf>,
    pub engine_dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Load `utw.json` from `dir`, defaulting if it is absent
    pub fn load(dir: &Path) -> Result<Self> {
        let path = project_config_path(dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| Error::file_read(&path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::config_parse(&path, e))
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Automation test pattern passed to `Automation RunTests`
    pub pattern: String,
    pub build_configuration: BuildConfiguration,
    pub project_dir: PathBuf,
    pub engine_dir: Option<PathBuf>,
    /// Explicit editor binary, bypassing engine discovery
    pub editor: Option<String>,
    pub color: bool,
}

impl Settings {
    /// Merge command line arguments with both configuration layers
    pub fn resolve(args: RunArgs, cwd: &Path, project: ProjectConfig, user: Config) -> Self {
        let build_configuration = args
            .build_configuration
            .or(project.build_configuration)
            .or(user.defaults.build_configuration)
            .unwrap_or_default();

        let project_dir = args
            .project_dir
            .or(project.project_dir)
            .map(|dir| cwd.join(dir))
            .unwrap_or_else(|| cwd.to_path_buf());

        let engine_dir = args
            .engine_dir
            .or(project.engine_dir)
            .or(user.defaults.engine_dir);

        Self {
            pattern: args.test_pattern,
            build_configuration,
            project_dir,
            engine_dir,
            editor: args.editor,
            color: !args.no_color && user.display.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pattern: &str) -> RunArgs {
        RunArgs {
            test_pattern: pattern.to_string(),
            build_configuration: None,
            project_dir: None,
            engine_dir: None,
            editor: None,
            no_color: false,
        }
    }

    #[test]
    fn test_parse_project_config() {
        let json = r#"{"buildConfiguration": "DebugGame", "engineDir": "/ue/5.3"}"#;
        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.build_configuration, Some(BuildConfiguration::DebugGame));
        assert_eq!(config.engine_dir, Some(PathBuf::from("/ue/5.3")));
        assert!(config.project_dir.is_none());
    }

    #[test]
    fn test_parse_user_config() {
        let toml = r#"
            [defaults]
            build_configuration = "Test"

            [display]
            color = false
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.build_configuration, Some(BuildConfiguration::Test));
        assert!(!config.display.color);
    }

    #[test]
    fn test_flags_override_project_and_user_config() {
        let mut a = args("Project.Smoke");
        a.build_configuration = Some(BuildConfiguration::Shipping);

        let project = ProjectConfig {
            build_configuration: Some(BuildConfiguration::Debug),
            project_dir: Some(PathBuf::from("Game")),
            engine_dir: Some(PathBuf::from("/ue/project")),
        };
        let user = Config {
            defaults: Defaults {
                build_configuration: Some(BuildConfiguration::Test),
                engine_dir: Some(PathBuf::from("/ue/user")),
            },
            display: DisplayConfig::default(),
        };

        let settings = Settings::resolve(a, Path::new("/work"), project, user);
        assert_eq!(settings.build_configuration, BuildConfiguration::Shipping);
        assert_eq!(settings.project_dir, PathBuf::from("/work/Game"));
        assert_eq!(settings.engine_dir, Some(PathBuf::from("/ue/project")));
        assert!(settings.color);
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let mut a = args("Smoke");
        a.no_color = true;
        let settings = Settings::resolve(a, Path::new("/work"), ProjectConfig::default(), Config::default());
        assert_eq!(settings.build_configuration, BuildConfiguration::Development);
        assert_eq!(settings.project_dir, PathBuf::from("/work"));
        assert!(settings.engine_dir.is_none());
        assert!(!settings.color);
    }

    #[test]
    fn test_missing_files_default() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectConfig::load(dir.path()).unwrap();
        assert!(project.build_configuration.is_none());

        let user = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(user.display.color);
    }

    #[test]
    fn test_invalid_project_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("utw.json"), "{ not json").unwrap();
        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }
}
