//! Command handlers for the btypes CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod dump;
pub mod layout;
