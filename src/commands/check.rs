use crate::{
    core::select_versions,
    errors::Result,
    hg::{fetch_current_branches, Hg},
    payload::{dump_payload, parse_payload, read_raw_payload, write_versions},
    store::{resolve_built, VersionStore},
};
use clap::Args;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Check {
    /// Write the received payload to this file, for debugging
    #[arg(long, env = "HG_RESOURCE_DUMP_PAYLOAD")]
    pub dump_payload: Option<PathBuf>,
}

impl Check {
    pub fn execute<H: Hg>(&self, hg: &H) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run(hg, stdin.lock(), stdout.lock())
    }

    /// Read the check request, compute the next versions and write them out
    ///
    /// Nothing is written when any step fails
    pub fn run<H: Hg, R: Read, W: Write>(&self, hg: &H, input: R, output: W) -> Result<()> {
        let raw = read_raw_payload(input)?;
        if let Some(path) = &self.dump_payload {
            dump_payload(&raw, path)?;
        }

        let request = parse_payload(&raw)?;
        let source = &request.source;
        let latest = request.latest_version()?;
        let filter = source.branch_filter()?;
        let dest = source.dest_path();

        let mut current = fetch_current_branches(hg, &source.uri, &dest)?;
        if let Some(filter) = filter {
            current.retain(|branch| filter.is_match(&branch.name));
        }

        let store = VersionStore::for_repo(&dest);
        let built = resolve_built(store.load()?, latest);

        let versions = select_versions(&built, &current);
        store.save(&versions)?;

        let versions = source.version_order.emit(versions);
        log::debug!("Emitting {} versions", versions.len());

        write_versions(output, &versions)
    }
}
