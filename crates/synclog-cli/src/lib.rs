mod args;
mod commands;
pub mod config;
mod handlers;
pub mod types;
mod views;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
