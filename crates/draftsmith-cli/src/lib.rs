pub mod config;
pub mod output;
pub mod prompt;
pub mod repair;
