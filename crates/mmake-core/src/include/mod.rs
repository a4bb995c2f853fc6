//! Makefile include handling.
//!
//! Scans a Makefile for `include` directives and installs the remote ones
//! into a local include directory.

mod installer;
mod parse;

pub use installer::{IncludeInstaller, InstallStatus, Installed};
pub use parse::{Include, parse_includes};
