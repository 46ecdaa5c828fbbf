//! Engine installation lookup
//!
//! Installed engines are registered by the Epic launcher: in the registry on
//! Windows, and in `Install.ini` on macOS and Linux. Source builds are found
//! by walking up to the enclosing `Engine` or `Templates` directory.

use std::path::{Component, Path, PathBuf};

use ini::{Ini, ParseOption};

use crate::common::{Error, Result};

use super::Project;

/// Registry key under `HKEY_CURRENT_USER` holding engine associations on Windows
pub const BUILDS_REGISTRY_KEY: &str = r"Software\Epic Games\Unreal Engine\Builds";

/// Section of `Install.ini` mapping associations to install directories
const INSTALLATIONS_SECTION: &str = "Installations";

/// Resolve the engine directory for `project`
///
/// An explicit directory always wins, but must exist.
pub async fn engine_dir(explicit: Option<&Path>, project: &Project) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if !dir.exists() {
            return Err(Error::EngineDirMissing(dir.to_path_buf()));
        }
        return Ok(dir.to_path_buf());
    }

    match project.engine_association()? {
        Some(association) => installed_engine(&association).await,
        None => source_tree_root(project.dir()).ok_or(Error::EngineAssociationMissing),
    }
}

/// Root of an engine source tree containing `dir`, if any
///
/// The root is the parent of the first `Engine` component, or failing that
/// of the first `Templates` component.
pub fn source_tree_root(dir: &Path) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = dir.components().collect();
    let index = components
        .iter()
        .position(|c| c.as_os_str() == "Engine")
        .or_else(|| components.iter().position(|c| c.as_os_str() == "Templates"))?;

    Some(components[..index].iter().collect())
}

#[cfg(windows)]
async fn installed_engine(association: &str) -> Result<PathBuf> {
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    let path: String = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey(BUILDS_REGISTRY_KEY)
        .and_then(|builds| builds.get_value(association))
        .map_err(|e| {
            tracing::debug!(key = BUILDS_REGISTRY_KEY, association, "Registry lookup failed: {}", e);
            Error::EngineNotInstalled(association.to_string())
        })?;

    Ok(PathBuf::from(path))
}

#[cfg(not(windows))]
async fn installed_engine(association: &str) -> Result<PathBuf> {
    let not_installed = || Error::EngineNotInstalled(association.to_string());

    let ini = crate::common::paths::engine_install_ini().ok_or_else(not_installed)?;
    let content = tokio::fs::read_to_string(&ini).await.map_err(|e| {
        tracing::debug!(path = %ini.display(), "Cannot read Install.ini: {}", e);
        not_installed()
    })?;

    parse_install_ini(&content, association).ok_or_else(not_installed)
}

/// Look up `association` in the `[Installations]` section of an `Install.ini`
///
/// Backslashes are kept as written; quoted values are unquoted.
pub fn parse_install_ini(content: &str, association: &str) -> Option<PathBuf> {
    let options = ParseOption {
        enabled_quote: true,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options)
        .map_err(|e| tracing::debug!("Malformed Install.ini: {}", e))
        .ok()?;

    ini.section(Some(INSTALLATIONS_SECTION))?
        .get(association)
        .map(PathBuf::from)
}
