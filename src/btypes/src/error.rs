//! Error types

use thiserror::Error;

/// Fatal startup errors raised while freezing schemas into layouts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("{schema}.{field}: reference to unknown schema '{target}'")]
    UnknownSchema {
        schema: String,
        field: String,
        target: String,
    },

    #[error("Schema '{0}' is declared more than once")]
    DuplicateSchema(String),

    #[error("{schema}.{field}: declared more than once without a version condition")]
    DuplicateField { schema: String, field: String },

    #[error("{schema}.{field}: no variant matches host version {version}")]
    NoMatchingBranch {
        schema: String,
        field: String,
        version: String,
    },

    #[error("{schema}.{field}: union has no members")]
    EmptyUnion { schema: String, field: String },

    #[error("{schema}.{field}: schema '{target}' contains itself by value")]
    RecursiveValue {
        schema: String,
        field: String,
        target: String,
    },

    #[error("{schema}.{field}: deferred descriptor did not resolve to a concrete type")]
    UnresolvedDeferred { schema: String, field: String },
}

/// Errors raised by memory sources
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Access to null address")]
    NullAddress,

    #[error("Access of {size} bytes at {address:#x} is outside the mapped range")]
    OutOfBounds { address: usize, size: usize },

    #[error("Memory source is read-only (write of {size} bytes at {address:#x})")]
    ReadOnly { address: usize, size: usize },
}

/// Errors raised by the registry, views and list walks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Layout resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Layouts have not been initialized")]
    NotInitialized,

    #[error("Layouts have already been initialized")]
    AlreadyInitialized,

    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("{handle} does not expose a raw address (expected a {schema} handle)")]
    InvalidHandle { schema: String, handle: String },

    #[error("{schema} has no member '{field}'")]
    UnknownField { schema: String, field: String },

    #[error("{schema}.{field}: expected {expected}, got {actual}")]
    TypeMismatch {
        schema: String,
        field: String,
        expected: String,
        actual: String,
    },

    #[error("{schema}.{field}: null pointer")]
    NullPointer { schema: String, field: String },

    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("List has no node type; use with_node() to iterate it")]
    UntypedList,

    #[error("Unknown {kind} name: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Memory access failed: {0}")]
    Memory(#[from] MemoryError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
