mod args;
mod commands;
pub mod scanner;

pub use args::Cli;
pub use commands::run;
