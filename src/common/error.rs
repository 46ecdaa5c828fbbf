//! Error types for the test wrapper
//!
//! Errors only arise while preparing a run (finding the project, the engine
//! and the editor binary) or spawning it. Once the editor is running, log
//! interpretation never fails; the editor's exit code is the only result.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the test wrapper
#[derive(Error, Debug)]
pub enum Error {
    // === Project Errors ===
    #[error("No .uproject file found in {0}. Run from your project directory or pass --project-dir")]
    ProjectNotFound(PathBuf),

    #[error("Found {count} .uproject files in {dir}. Run in a directory that only has one .uproject file")]
    AmbiguousProject { dir: PathBuf, count: usize },

    #[error("Invalid project file '{path}': {reason}")]
    InvalidProject { path: String, reason: String },

    // === Engine Errors ===
    #[error("Engine directory {0} does not exist")]
    EngineDirMissing(PathBuf),

    #[error("Need to specify EngineAssociation in the uproject file or run in an engine directory")]
    EngineAssociationMissing,

    #[error("Could not find the installed engine version {0}. Pass --engine-dir to point at it")]
    EngineNotInstalled(String),

    #[error("Could not find UE4Editor{suffix} or UnrealEditor{suffix} for engine version located at {engine_dir}")]
    EditorNotFound { suffix: String, engine_dir: PathBuf },

    #[error("Editor binary '{0}' not found")]
    EditorBinaryNotFound(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    // === Process Errors ===
    #[error("Failed to start Unreal: {0}")]
    SpawnFailed(String),

    // === Configuration Errors ===
    #[error("Invalid configuration file '{path}': {reason}")]
    ConfigParse { path: String, reason: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file read error for a path
    pub fn file_read(path: &std::path::Path, error: impl std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a configuration parse error for a path
    pub fn config_parse(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        Self::ConfigParse {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an editor not found error
    pub fn editor_not_found(suffix: &str, engine_dir: &std::path::Path) -> Self {
        Self::EditorNotFound {
            suffix: suffix.to_string(),
            engine_dir: engine_dir.to_path_buf(),
        }
    }
}
