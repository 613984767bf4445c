pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod history;
pub mod logging;
pub mod runner;
pub mod scanner;

pub use runner::{FolderReport, Renamer, RunOptions, RunReport};
