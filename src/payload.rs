use crate::core::BranchRef;
use crate::errors::{HgResourceError, Result};
use regex::Regex;
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Where the most recent version goes in the emitted list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionOrder {
    NewestFirst,
    #[default]
    NewestLast,
}

impl VersionOrder {
    /// Reorder a list coming out of `select_versions`, which puts the newest version first
    pub fn emit(self, mut versions: Vec<BranchRef>) -> Vec<BranchRef> {
        if self == VersionOrder::NewestLast {
            versions.reverse();
        }
        versions
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Source {
    pub uri: String,
    #[serde(default)]
    pub dest: Option<PathBuf>,
    /// Only track branches whose whole name matches this pattern
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub version_order: VersionOrder,
}

impl Source {
    /// Local working copy, one per repository uri when not configured
    pub fn dest_path(&self) -> PathBuf {
        if let Some(dest) = &self.dest {
            return dest.clone();
        }

        let dir_name: String = self
            .uri
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        std::env::temp_dir().join("hg-resource").join(dir_name)
    }

    pub fn branch_filter(&self) -> Result<Option<Regex>> {
        let Some(pattern) = &self.branch else {
            return Ok(None);
        };

        Regex::new(&format!("^(?:{})$", pattern))
            .map(Some)
            .map_err(|e| HgResourceError::MalformedPayload(format!("invalid branch pattern '{}': {}", pattern, e)))
    }
}

/// Version as found in the payload, `{}` meaning no version yet
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PayloadVersion {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckRequest {
    pub source: Source,
    #[serde(default)]
    pub version: Option<PayloadVersion>,
}

impl CheckRequest {
    /// Latest version known to the orchestrator
    pub fn latest_version(&self) -> Result<Option<BranchRef>> {
        match &self.version {
            None => Ok(None),
            Some(PayloadVersion { branch: None, sha: None }) => Ok(None),
            Some(PayloadVersion {
                branch: Some(branch),
                sha: Some(sha),
            }) => Ok(Some(BranchRef::new(branch.as_str(), sha.as_str()))),
            Some(version) => Err(HgResourceError::MalformedPayload(format!(
                "version needs both branch and sha, got {:?}",
                version
            ))),
        }
    }
}

pub fn read_raw_payload<R: Read>(mut reader: R) -> Result<String> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|e| HgResourceError::MalformedPayload(e.to_string()))?;
    Ok(raw)
}

pub fn parse_payload(raw: &str) -> Result<CheckRequest> {
    let request: CheckRequest =
        serde_json::from_str(raw).map_err(|e| HgResourceError::MalformedPayload(e.to_string()))?;
    log::debug!("Payload: {:?}", request);
    Ok(request)
}

/// Keep a copy of the payload as received, for debugging
pub fn dump_payload(raw: &str, path: &Path) -> Result<()> {
    std::fs::write(path, raw).map_err(|e| {
        log::error!("Cannot write payload to {}: {}", path.display(), e);
        e
    })?;
    Ok(())
}

pub fn write_versions<W: Write>(mut writer: W, versions: &[BranchRef]) -> Result<()> {
    serde_json::to_writer(&mut writer, versions)?;
    writeln!(writer)?;
    Ok(())
}
