//! Command-line front end for the `gapi-auth` OAuth2 helper.
//!
//! This crate provides the `gapi-auth` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::{CliError, CliResult};
