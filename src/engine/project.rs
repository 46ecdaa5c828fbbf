//! Project descriptor discovery

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::{Error, Result};

/// The `.uproject` file a run is launched against
#[derive(Debug, Clone)]
pub struct Project {
    pub path: PathBuf,
}

/// The subset of the `.uproject` JSON we care about
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Descriptor {
    #[serde(default)]
    engine_association: Option<String>,
}

impl Project {
    /// Find the single `.uproject` file directly inside `dir`
    pub fn find(dir: &Path) -> Result<Self> {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| Error::file_read(dir, e))? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "uproject") && path.is_file() {
                found.push(path);
            }
        }

        match found.len() {
            0 => Err(Error::ProjectNotFound(dir.to_path_buf())),
            1 => Ok(Self {
                path: found.remove(0),
            }),
            count => Err(Error::AmbiguousProject {
                dir: dir.to_path_buf(),
                count,
            }),
        }
    }

    /// Directory containing the project file
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// The engine the project was created with, if it names one
    ///
    /// Source builds leave this empty; an empty string is treated as absent.
    pub fn engine_association(&self) -> Result<Option<String>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| Error::file_read(&self.path, e))?;
        let descriptor: Descriptor =
            serde_json::from_str(&content).map_err(|e| Error::InvalidProject {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(descriptor.engine_association.filter(|a| !a.is_empty()))
    }
}
