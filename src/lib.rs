//! PARA-style email organization over JMAP.
//!
//! The library half of the `paramail` binary: credential loading, the
//! JMAP protocol client, the PARA folder resolver, and one module per
//! CLI subcommand.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod jmap;
pub mod output;
pub mod para;

// Test support shared between unit and integration tests.
pub mod test_helpers;
