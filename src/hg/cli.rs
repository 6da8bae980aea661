use crate::core::BranchRef;
use crate::errors::{HgResourceError, Result};
use crate::parser::{parse_branch_listing, BRANCH_TEMPLATE};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

pub trait Hg {
    /// Clone the repository into `dest`, or pull into it when it already exists
    fn update_repo(&self, uri: &str, dest: &Path) -> Result<()>;
    /// List the heads of every branch of the local repository
    fn list_branches(&self, repo: &Path) -> Result<Vec<BranchRef>>;
}

pub struct HgCliImpl {
    program: String,
}

impl HgCliImpl {
    pub fn new() -> Self {
        Self::with_program("hg")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run_command(&self, args: &[&OsStr]) -> Result<std::process::Output> {
        let command = std::iter::once(self.program.clone())
            .chain(args.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        log::debug!("Running `{}`", command);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| HgResourceError::ExternalProcess {
                command: command.clone(),
                stderr: format!("Failed to execute hg: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!("`{}` exited with {}", command, output.status);
            return Err(HgResourceError::ExternalProcess { command, stderr });
        }

        // stdout belongs to the resource protocol, hg chatter only goes to the logs
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{}", stdout.trim());
        }

        Ok(output)
    }
}

impl Default for HgCliImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Hg for HgCliImpl {
    fn update_repo(&self, uri: &str, dest: &Path) -> Result<()> {
        if dest.exists() {
            log::info!("Pulling {} into {}", uri, dest.display());
            self.run_command(&[OsStr::new("-R"), dest.as_os_str(), OsStr::new("pull")])?;
        } else {
            log::info!("Cloning {} into {}", uri, dest.display());
            self.run_command(&[OsStr::new("clone"), OsStr::new(uri), dest.as_os_str()])?;
        }
        Ok(())
    }

    fn list_branches(&self, repo: &Path) -> Result<Vec<BranchRef>> {
        let output = self.run_command(&[
            OsStr::new("-R"),
            repo.as_os_str(),
            OsStr::new("branches"),
            OsStr::new("--template"),
            OsStr::new(BRANCH_TEMPLATE),
        ])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_branch_listing(&stdout)
    }
}

/// Bring the local copy up to date and list its branch heads
pub fn fetch_current_branches<H: Hg>(hg: &H, uri: &str, dest: &Path) -> Result<Vec<BranchRef>> {
    hg.update_repo(uri, dest)?;
    let branches = hg.list_branches(dest)?;
    log::debug!("Found {} branch heads in {}", branches.len(), dest.display());
    Ok(branches)
}

#[cfg(test)]
pub struct MockHg {
    pub branches: Vec<BranchRef>,
    pub fail_update: Option<String>,
    pub updated: std::sync::Mutex<Vec<(String, std::path::PathBuf)>>,
    pub listed: std::sync::Mutex<Vec<std::path::PathBuf>>,
}

#[cfg(test)]
impl MockHg {
    pub fn new() -> Self {
        Self {
            branches: Vec::new(),
            fail_update: None,
            updated: std::sync::Mutex::new(Vec::new()),
            listed: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_branches(mut self, branches: Vec<BranchRef>) -> Self {
        self.branches = branches;
        self
    }

    pub fn failing_update(mut self, stderr: &str) -> Self {
        self.fail_update = Some(stderr.to_string());
        self
    }

    pub fn get_updated(&self) -> Vec<(String, std::path::PathBuf)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn get_listed(&self) -> Vec<std::path::PathBuf> {
        self.listed.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Hg for MockHg {
    fn update_repo(&self, uri: &str, dest: &Path) -> Result<()> {
        if let Some(stderr) = &self.fail_update {
            return Err(HgResourceError::ExternalProcess {
                command: format!("hg clone {} {}", uri, dest.display()),
                stderr: stderr.clone(),
            });
        }

        self.updated
            .lock()
            .unwrap()
            .push((uri.to_string(), dest.to_path_buf()));
        Ok(())
    }

    fn list_branches(&self, repo: &Path) -> Result<Vec<BranchRef>> {
        self.listed.lock().unwrap().push(repo.to_path_buf());
        Ok(self.branches.clone())
    }
}
