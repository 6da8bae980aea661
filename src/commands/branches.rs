use crate::{
    errors::Result,
    hg::{fetch_current_branches, Hg},
    payload::Source,
};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Branches {
    /// Repository to look at
    #[arg(long)]
    pub uri: String,
    /// Local working copy
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

impl Branches {
    pub fn execute<H: Hg>(&self, hg: &H) -> Result<()> {
        let stdout = std::io::stdout();
        self.run(hg, stdout.lock())
    }

    /// Print every branch head as `<name>:<revision>`
    pub fn run<H: Hg, W: Write>(&self, hg: &H, mut output: W) -> Result<()> {
        let source = Source {
            uri: self.uri.clone(),
            dest: self.dest.clone(),
            branch: None,
            version_order: Default::default(),
        };

        for branch in fetch_current_branches(hg, &source.uri, &source.dest_path())? {
            writeln!(output, "{}", branch)?;
        }
        Ok(())
    }
}
