//! Locus command line interface
//!
//! Commands, layered configuration, report formatters and error reporting
//! for the `locus` binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod paths;
