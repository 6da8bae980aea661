use clap::Parser;
use clap::Subcommand;
use commands::branches::Branches;
use commands::check::Check;
use hg::HgCliImpl;

mod commands;
mod core;
mod errors;
mod hg;
mod parser;
mod payload;
mod store;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "hg-resource")]
#[command(about = "Track mercurial branch heads as concourse versions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Read a check request on stdin and print the next versions
    Check(Check),
    /// Print the current branch heads of a repository
    Branches(Branches),
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let hg = HgCliImpl::new();

    let result = match args.command {
        Commands::Check(check) => check.execute(&hg),
        Commands::Branches(branches) => branches.execute(&hg),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
