//! Host struct declarations
//!
//! A representative subset of the host's DNA, window-manager, screen and
//! interface structs, declared with the version conditions of the host's
//! headers. Padding is declared explicitly wherever the host compiler
//! inserts it.

mod dna;
mod interface;
mod screen;
mod wm;
mod wrappers;

pub use wrappers::{Area, Event, TextRuntime};

use crate::schema::Schema;

/// Every built-in host schema, in declaration order
pub fn declarations() -> Vec<Schema> {
    let mut schemas = Vec::new();
    schemas.extend(dna::declarations());
    schemas.extend(screen::declarations());
    schemas.extend(wm::declarations());
    schemas.extend(interface::declarations());
    schemas
}
