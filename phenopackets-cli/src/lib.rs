//! Command-line front end and HTTP server for phenopacket validation.

// The request logger writes to stderr directly.
#![allow(clippy::print_stderr)]

pub mod cli;
pub mod logging;
pub mod server;
