//! Editor binary resolution and command line

use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

use super::{BuildConfiguration, Platform};

/// Editor binary names, UE4 first
const EDITOR_NAMES: [&str; 2] = ["UE4Editor", "UnrealEditor"];

/// Suffix appended to the editor binary name
///
/// Development builds carry no configuration tag.
pub fn binary_suffix(platform: Platform, config: BuildConfiguration) -> String {
    match config {
        BuildConfiguration::Development => platform.exe_extension().to_string(),
        other => format!("-{}-{}{}", platform.label(), other, platform.exe_extension()),
    }
}

/// Find the editor binary inside an engine installation
pub fn find_editor(
    engine_dir: &Path,
    platform: Platform,
    config: BuildConfiguration,
) -> Result<PathBuf> {
    let suffix = binary_suffix(platform, config);
    let binaries = engine_dir
        .join("Engine")
        .join("Binaries")
        .join(platform.label());

    EDITOR_NAMES
        .iter()
        .map(|name| binaries.join(format!("{name}{suffix}")))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| Error::editor_not_found(&suffix, engine_dir))
}

/// Resolve an editor given on the command line
///
/// Values containing a path separator are taken as paths; bare names are
/// looked up on `PATH`.
pub fn resolve_explicit(editor: &str) -> Result<PathBuf> {
    let path = Path::new(editor);
    if path.components().count() > 1 {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::EditorBinaryNotFound(editor.to_string()))
        };
    }

    which::which(editor).map_err(|_| Error::EditorBinaryNotFound(editor.to_string()))
}

/// Arguments running `pattern` headless and quitting when done
pub fn automation_args(uproject: &Path, pattern: &str) -> Vec<String> {
    vec![
        uproject.display().to_string(),
        format!("-ExecCmds=Automation RunTests {pattern};Quit"),
        "-stdout".to_string(),
        "-FullStdOutLogOutput".to_string(),
        "-Unattended".to_string(),
        "-NoPause".to_string(),
        "-NoSplash".to_string(),
        "-NoSound".to_string(),
        "-NullRHI".to_string(),
    ]
}
