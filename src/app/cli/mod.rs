//! CLI module: argument parsing, configuration and report rendering

pub mod args;
pub mod config;
pub mod display;
