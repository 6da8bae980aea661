// Mercurial output related

use crate::{
    core::BranchRef,
    errors::{HgResourceError, Result},
};
use std::str::FromStr;

/// Separator between the entries of the `hg branches` template
pub const BRANCH_SEPARATOR: char = ';';

/// Template given to `hg branches` so that it can be read back by `parse_branch_listing`
pub const BRANCH_TEMPLATE: &str = "{branch}:{node};";

/// Parse a `<name>:<revision>` string, splitting on the first colon
pub fn parse_branch_ref(input: &str) -> Result<BranchRef> {
    let (name, revision) = input
        .split_once(':')
        .ok_or_else(|| HgResourceError::MalformedBranchRef(input.to_string()))?;
    Ok(BranchRef::new(name, revision))
}

impl FromStr for BranchRef {
    type Err = HgResourceError;

    fn from_str(s: &str) -> Result<Self> {
        parse_branch_ref(s)
    }
}

/// Parse the output of `hg branches --template "{branch}:{node};"`
pub fn parse_branch_listing(output: &str) -> Result<Vec<BranchRef>> {
    output
        .split(BRANCH_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_branch_ref)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_ref() {
        let branch = parse_branch_ref("default:8c14734b80ff0ffb93caefc85553c7c5b05cca1e").unwrap();
        assert_eq!(branch.name, "default");
        assert_eq!(branch.revision, "8c14734b80ff0ffb93caefc85553c7c5b05cca1e");
    }

    #[test]
    fn test_parse_branch_ref_splits_on_first_colon() {
        let branch: BranchRef = "feature:abc:def".parse().unwrap();
        assert_eq!(branch.name, "feature");
        assert_eq!(branch.revision, "abc:def");
    }

    #[test]
    fn test_parse_branch_ref_without_colon() {
        let error = parse_branch_ref("default").unwrap_err();
        assert!(matches!(error, HgResourceError::MalformedBranchRef(ref s) if s == "default"));
    }

    #[test]
    fn test_display_uses_text_form() {
        let branch = BranchRef::new("stable", "ae36956d02aa");
        assert_eq!(branch.to_string(), "stable:ae36956d02aa");
    }

    #[test]
    fn test_parse_branch_listing() {
        let output = "default:8c14734b80ff;stable:9d25845c91ff;feature/x:ae36956d02aa;\n";
        let branches = parse_branch_listing(output).unwrap();
        assert_eq!(
            branches,
            vec![
                BranchRef::new("default", "8c14734b80ff"),
                BranchRef::new("stable", "9d25845c91ff"),
                BranchRef::new("feature/x", "ae36956d02aa"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_branch_listing() {
        assert!(parse_branch_listing("").unwrap().is_empty());
        assert!(parse_branch_listing("\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_branch_listing_with_malformed_entry() {
        let result = parse_branch_listing("default:8c14734b80ff;garbage;");
        assert!(matches!(result, Err(HgResourceError::MalformedBranchRef(ref s)) if s == "garbage"));
    }
}
