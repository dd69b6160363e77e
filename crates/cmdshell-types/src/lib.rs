//! Foundation types for cmdshell.
//!
//! This crate holds the pieces shared by the shell core and its hosts:
//! the error type and the TOML-backed shell configuration.

pub mod config;
pub mod error;
