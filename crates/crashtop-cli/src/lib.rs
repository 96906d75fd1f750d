pub mod args;
pub mod commands;
pub mod config;
pub mod output;
pub mod types;

pub use args::Cli;
pub use commands::run;
