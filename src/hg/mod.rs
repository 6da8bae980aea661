pub mod cli;


pub use cli::{fetch_current_branches, Hg, HgCliImpl};
