//! Engine and editor discovery
//!
//! Finds the project's `.uproject`, the engine installation it is associated
//! with, and the editor binary for the requested build configuration, then
//! assembles the headless automation command line.

pub mod editor;
pub mod locate;
pub mod project;

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::common::config::Settings;
use crate::common::{Error, Result};

pub use project::Project;

/// Unreal build configurations, as they appear in binary names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum BuildConfiguration {
    #[value(name = "Debug")]
    Debug,
    #[value(name = "DebugGame")]
    DebugGame,
    #[default]
    #[value(name = "Development")]
    Development,
    #[value(name = "Test")]
    Test,
    #[value(name = "Shipping")]
    Shipping,
}

impl BuildConfiguration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::DebugGame => "DebugGame",
            Self::Development => "Development",
            Self::Test => "Test",
            Self::Shipping => "Shipping",
        }
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host platform, as named under `Engine/Binaries`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Win64,
    Mac,
    Linux,
}

impl Platform {
    /// Detect the platform this binary runs on
    pub fn current() -> Result<Self> {
        match std::env::consts::OS {
            "windows" => Ok(Self::Win64),
            "macos" => Ok(Self::Mac),
            "linux" => Ok(Self::Linux),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Win64 => "Win64",
            Self::Mac => "Mac",
            Self::Linux => "Linux",
        }
    }

    pub fn exe_extension(&self) -> &'static str {
        match self {
            Self::Win64 => ".exe",
            Self::Mac | Self::Linux => "",
        }
    }
}

/// A fully resolved editor launch
#[derive(Debug, Clone)]
pub struct EditorInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Resolve everything needed to launch the editor for `settings`
pub async fn prepare(settings: &Settings) -> Result<EditorInvocation> {
    let project = Project::find(&settings.project_dir)?;
    tracing::debug!(uproject = %project.path.display(), "Found project");

    let program = match &settings.editor {
        Some(editor) => editor::resolve_explicit(editor)?,
        None => {
            let engine_dir = locate::engine_dir(settings.engine_dir.as_deref(), &project).await?;
            tracing::debug!(engine_dir = %engine_dir.display(), "Resolved engine directory");
            editor::find_editor(&engine_dir, Platform::current()?, settings.build_configuration)?
        }
    };

    Ok(EditorInvocation {
        program,
        args: editor::automation_args(&project.path, &settings.pattern),
    })
}
