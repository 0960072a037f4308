//! Process-wide layout registry
//!
//! Layouts are resolved once, at startup, for the version of the host the
//! process is running in, and are read-only afterwards.

use crate::error::{Error, Result};
use crate::host;
use crate::layout::LayoutTable;
use crate::schema::Schema;
use crate::version::HostInfo;

use once_cell::sync::OnceCell;

static LAYOUTS: OnceCell<LayoutTable> = OnceCell::new();

/// Warn about host builds whose struct layouts may differ from the release
pub fn check_version_cycle(host: &dyn HostInfo) {
    let cycle = host.version_cycle();
    if !cycle.is_release() {
        tracing::warn!(
            "Host {} is a {} build; struct layouts are only verified against releases",
            host.version(),
            cycle
        );
    }
}

/// Resolve `schemas` for the host's version and freeze the result
///
/// Fails with [`Error::AlreadyInitialized`] if called more than once. A
/// resolution failure leaves the registry empty.
pub fn initialize(host: &dyn HostInfo, schemas: Vec<Schema>) -> Result<&'static LayoutTable> {
    if LAYOUTS.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }
    check_version_cycle(host);

    let table = LayoutTable::resolve(&schemas, host.version()).map_err(|e| {
        tracing::error!("Failed to resolve host layouts: {}", e);
        Error::Resolution(e)
    })?;

    LAYOUTS.set(table).map_err(|_| Error::AlreadyInitialized)?;
    layouts()
}

/// Initialize with the built-in host declarations
pub fn initialize_host(host: &dyn HostInfo) -> Result<&'static LayoutTable> {
    initialize(host, host::declarations())
}

/// The frozen layouts
pub fn layouts() -> Result<&'static LayoutTable> {
    LAYOUTS.get().ok_or(Error::NotInitialized)
}

pub fn is_initialized() -> bool {
    LAYOUTS.get().is_some()
}
