//! Memory Source Abstraction
//!
//! Views never own the memory they read. Every access goes through a
//! [`MemorySource`]:
//! - [`LocalMemory`] - the current process (the host we are loaded into)
//! - [`DumpFile`] - a raw memory dump mapped at a base address
//! - [`MockMemorySource`] - an in-memory buffer for tests and offline work

mod dump;
mod local;
mod mock;
mod traits;

pub use dump::DumpFile;
pub use local::LocalMemory;
pub use mock::MockMemorySource;
pub use traits::MemorySource;
