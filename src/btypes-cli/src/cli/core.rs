//! Core CLI definitions

use btypes::HostVersion;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "btypes")]
#[command(about = "Versioned host struct layouts and memory views", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for layout reports
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every declared schema with its resolved size
    Schemas {
        /// Host version to resolve for (uses configured default if not provided)
        #[arg(long)]
        host_version: Option<HostVersion>,
    },

    /// Print the resolved layout of one schema
    #[command(visible_alias = "l")]
    Layout {
        /// Schema name (e.g. "wmEvent")
        schema: String,

        /// Host version to resolve for (uses configured default if not provided)
        #[arg(long)]
        host_version: Option<HostVersion>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compare a schema's layout between two host versions
    #[command(visible_alias = "d")]
    Diff {
        /// Schema name
        schema: String,

        /// Older host version
        #[arg(long)]
        from: HostVersion,

        /// Newer host version
        #[arg(long)]
        to: HostVersion,
    },

    /// Print every field of a struct stored in a memory dump
    #[command(visible_alias = "r")]
    Read {
        /// Raw memory dump file
        #[arg(long)]
        dump: PathBuf,

        /// Virtual address of the dump's first byte (hex or decimal)
        #[arg(long)]
        base: String,

        /// Schema name of the struct
        schema: String,

        /// Address of the struct (hex or decimal)
        address: String,

        /// Host version to resolve for (uses configured default if not provided)
        #[arg(long)]
        host_version: Option<HostVersion>,

        /// Also print the struct's raw bytes
        #[arg(long)]
        raw: bool,
    },

    /// Walk an intrusive list stored in a memory dump
    #[command(visible_alias = "w")]
    Walk {
        /// Raw memory dump file
        #[arg(long)]
        dump: PathBuf,

        /// Virtual address of the dump's first byte (hex or decimal)
        #[arg(long)]
        base: String,

        /// Schema name of the list nodes
        #[arg(long)]
        node: String,

        /// Address of the list head (hex or decimal)
        address: String,

        /// Print this field of every node
        #[arg(long)]
        field: Option<String>,

        /// Stop after this many nodes
        #[arg(long, default_value = "10000")]
        limit: usize,

        /// Host version to resolve for (uses configured default if not provided)
        #[arg(long)]
        host_version: Option<HostVersion>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default host version
        #[arg(long)]
        host_version: Option<HostVersion>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
