//! Layout inspection command handlers
//!
//! Handles `schemas`, `layout` and `diff`, which only need the built-in host
//! declarations and a version.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use btypes::{host, HostVersion, LayoutTable, ResolvedLayout};
use std::fmt::Write;

/// Resolve the built-in declarations for `version`
pub fn resolve(version: HostVersion) -> Result<LayoutTable> {
    LayoutTable::resolve(&host::declarations(), version)
        .with_context(|| format!("Failed to resolve layouts for host {}", version))
}

/// Handle the schemas command
pub fn schemas(version: HostVersion) -> Result<()> {
    let table = resolve(version)?;

    println!("{} schemas for host {}:", table.len(), version);
    for layout in table.iter() {
        println!("  {:<36} {:>6} bytes", layout.name(), layout.size());
    }

    Ok(())
}

/// Handle the layout command
pub fn show(schema: &str, version: HostVersion, format: OutputFormat) -> Result<()> {
    let table = resolve(version)?;
    let layout = table.layout(schema)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(layout, version)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(layout)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(layout)?),
    }

    Ok(())
}

fn render_text(layout: &ResolvedLayout, version: HostVersion) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} @ {} ({} bytes)",
        layout.name(),
        version,
        layout.size()
    );
    let _ = writeln!(out, "  {:>6}  {:>5}  {:<28}  name", "offset", "size", "type");
    for field in layout.fields() {
        let _ = writeln!(
            out,
            "  {:#06x}  {:>5}  {:<28}  {}",
            field.offset,
            field.size,
            field.ty.describe(),
            field.name
        );
    }
    out
}

/// A single difference between two layouts of the same schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Added {
        name: String,
        offset: usize,
        size: usize,
    },
    Removed {
        name: String,
        offset: usize,
        size: usize,
    },
    Moved {
        name: String,
        from: usize,
        to: usize,
    },
    Resized {
        name: String,
        from: usize,
        to: usize,
    },
}

impl std::fmt::Display for FieldChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { name, offset, size } => {
                write!(f, "+ {} at {:#x} ({} bytes)", name, offset, size)
            }
            Self::Removed { name, offset, size } => {
                write!(f, "- {} at {:#x} ({} bytes)", name, offset, size)
            }
            Self::Moved { name, from, to } => {
                write!(f, "~ {} moved {:#x} -> {:#x}", name, from, to)
            }
            Self::Resized { name, from, to } => {
                write!(f, "~ {} resized {} -> {} bytes", name, from, to)
            }
        }
    }
}

/// Field-level differences from `old` to `new`
///
/// Fields present in both layouts may be reported as both moved and resized.
pub fn diff_layouts(old: &ResolvedLayout, new: &ResolvedLayout) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for field in new.fields() {
        match old.field(&field.name) {
            None => changes.push(FieldChange::Added {
                name: field.name.clone(),
                offset: field.offset,
                size: field.size,
            }),
            Some(before) => {
                if before.offset != field.offset {
                    changes.push(FieldChange::Moved {
                        name: field.name.clone(),
                        from: before.offset,
                        to: field.offset,
                    });
                }
                if before.size != field.size {
                    changes.push(FieldChange::Resized {
                        name: field.name.clone(),
                        from: before.size,
                        to: field.size,
                    });
                }
            }
        }
    }

    for field in old.fields() {
        if !new.has_field(&field.name) {
            changes.push(FieldChange::Removed {
                name: field.name.clone(),
                offset: field.offset,
                size: field.size,
            });
        }
    }

    changes
}

/// Handle the diff command
pub fn diff(schema: &str, from: HostVersion, to: HostVersion) -> Result<()> {
    let old_table = resolve(from)?;
    let new_table = resolve(to)?;
    let old = old_table.layout(schema)?;
    let new = new_table.layout(schema)?;

    println!(
        "{}: {} -> {} ({} -> {} bytes)",
        schema,
        from,
        to,
        old.size(),
        new.size()
    );

    let changes = diff_layouts(old, new);
    if changes.is_empty() {
        println!("  No layout changes");
    }
    for change in &changes {
        println!("  {}", change);
    }

    Ok(())
}
