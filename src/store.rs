use crate::core::BranchRef;
use crate::errors::Result;
use std::path::{Path, PathBuf};

pub const VERSIONS_FILE: &str = "hg-resource-versions.json";

/// Version list of the previous check, kept next to the working copy
///
/// The check protocol only hands back the latest version, the rest of the
/// list has to survive between invocations for every branch to get its turn.
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    pub fn for_repo(dest: &Path) -> Self {
        Self {
            path: dest.join(".hg").join(VERSIONS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored list, newest first, or `None` when there is nothing usable
    pub fn load(&self) -> Result<Option<Vec<BranchRef>>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(versions) => Ok(Some(versions)),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", self.path().display(), e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, versions: &[BranchRef]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(versions)?).map_err(|e| {
            log::error!("Cannot write {}: {}", self.path().display(), e);
            e
        })?;
        Ok(())
    }
}

/// Pick the list to select from
///
/// The stored list is only trusted when it still holds the version the
/// orchestrator reports, otherwise the orchestrator's version is all we know.
pub fn resolve_built(stored: Option<Vec<BranchRef>>, latest: Option<BranchRef>) -> Vec<BranchRef> {
    let Some(latest) = latest else {
        return Vec::new();
    };

    match stored {
        Some(stored) if stored.contains(&latest) => stored,
        _ => {
            log::debug!("No stored versions matching {}, starting from it alone", latest);
            vec![latest]
        }
    }
}
