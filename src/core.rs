use serde::{Deserialize, Serialize};

/// A branch head as reported by mercurial
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BranchRef {
    #[serde(rename = "branch")]
    pub name: String,
    #[serde(rename = "sha")]
    pub revision: String,
}

impl BranchRef {
    pub fn new(name: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: revision.into(),
        }
    }
}

impl std::fmt::Display for BranchRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.revision)
    }
}

/// How a tracked branch relates to the current branch heads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    SameRevision(BranchRef),
    DifferentRevision(BranchRef),
    NotFound,
}

/// Look for the target branch among the current heads
///
/// The first head with the same name wins
pub fn find_branch(target: &BranchRef, current: &[BranchRef]) -> MatchResult {
    let Some(branch) = current.iter().find(|branch| branch.name == target.name) else {
        return MatchResult::NotFound;
    };

    if branch.revision == target.revision {
        MatchResult::SameRevision(branch.clone())
    } else {
        MatchResult::DifferentRevision(branch.clone())
    }
}

/// Compute the next list of versions from the already built ones and the current heads
///
/// Tracked branches are checked from the most recent one:
///  - same revision: still tracked, not a new candidate
///  - different revision: moved to the front and returned right away
///  - not found: dropped
///
/// When nothing moved and some heads are still untracked, the last untracked
/// head is admitted at the front. Only one branch is surfaced per call so a
/// repository full of branches is built one at a time.
pub fn select_versions(built: &[BranchRef], current: &[BranchRef]) -> Vec<BranchRef> {
    let mut versions = built.to_vec();
    let mut candidates = current.to_vec();

    for branch in built.iter().rev() {
        match find_branch(branch, current) {
            MatchResult::SameRevision(_) => {
                log::debug!("{} is up to date", branch);
                remove_first(&mut candidates, branch);
            }
            MatchResult::DifferentRevision(updated) => {
                log::info!("{} moved to {}", branch, updated.revision);
                remove_first(&mut versions, branch);
                versions.insert(0, updated);
                return versions;
            }
            MatchResult::NotFound => {
                log::info!("{} no longer exists, dropping it", branch);
                remove_first(&mut versions, branch);
            }
        }
    }

    if versions.len() != current.len() {
        if let Some(admitted) = candidates.pop() {
            log::info!("admitting new branch {}", admitted);
            versions.insert(0, admitted);
        }
    }

    versions
}

fn remove_first(branches: &mut Vec<BranchRef>, target: &BranchRef) {
    if let Some(index) = branches.iter().position(|branch| branch == target) {
        branches.remove(index);
    }
}
