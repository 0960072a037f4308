//! # btypes
//!
//! Version-aware views of a host application's private C structs.
//!
//! This library provides:
//! - Schema declarations whose fields depend on the host version
//! - Layout resolution into exact offsets for the running host version
//! - Non-owning typed views that read and write host memory in place
//! - Walking of the host's intrusive doubly-linked lists
//!
//! ## Example
//!
//! ```
//! use btypes::memory::MockMemorySource;
//! use btypes::schema::{Scalar, Schema};
//! use btypes::{Binding, LayoutTable, Rect};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schemas = [Schema::new("rcti")
//!     .field("xmin", Scalar::I32)
//!     .field("xmax", Scalar::I32)
//!     .field("ymin", Scalar::I32)
//!     .field("ymax", Scalar::I32)];
//! let layouts = LayoutTable::resolve(&schemas, (3, 3))?;
//!
//! let memory = MockMemorySource::new(64, 0x1000);
//! let view = Binding::new(&memory, &layouts).from_address("rcti", 0x1000)?;
//! view.set("xmax", 10)?;
//! assert_eq!(view.get_int("xmax")?, 10);
//!
//! let rect = Rect::new(view)?;
//! rect.set_position(3.0, 2.0)?;
//! assert_eq!(rect.xmax()?, 13.0);
//! # Ok(())
//! # }
//! ```

pub mod defs;
pub mod error;
pub mod host;
pub mod layout;
pub mod listbase;
pub mod lookup;
pub mod memory;
pub mod registry;
pub mod schema;
pub mod value;
pub mod version;
pub mod view;

// Re-export commonly used items
#[doc(inline)]
pub use error::{Error, MemoryError, ResolutionError, Result};
#[doc(inline)]
pub use layout::{ConcreteType, LayoutTable, Pointee, ResolvedField, ResolvedLayout};
#[doc(inline)]
pub use listbase::{links, ListBase, ListIter};
#[doc(inline)]
pub use memory::{DumpFile, LocalMemory, MemorySource, MockMemorySource};
#[doc(inline)]
pub use schema::{FieldType, Predicate, Scalar, Schema};
#[doc(inline)]
pub use value::Value;
#[doc(inline)]
pub use version::{HostInfo, HostVersion, StaticHost, VersionCycle};
#[doc(inline)]
pub use view::{Binding, FieldValue, HostHandle, HostStruct, Pointer, Rect, Vec2, View};
