//! Process-wide registry lifecycle
//!
//! The registry is a process global, so the whole lifecycle runs in one test.

use btypes::registry;
use btypes::{Binding, Error, MockMemorySource, Rect, StaticHost, VersionCycle};

#[test]
fn test_registry_lifecycle() {
    let memory = MockMemorySource::new(64, 0x1000);

    assert!(!registry::is_initialized());
    assert_eq!(registry::layouts().unwrap_err(), Error::NotInitialized);
    assert!(matches!(Binding::global(&memory), Err(Error::NotInitialized)));

    let host = StaticHost::new((3, 3, 1)).with_cycle(VersionCycle::Beta);
    let table = registry::initialize_host(&host).unwrap();
    assert_eq!(table.version().as_tuple(), (3, 3, 1));
    assert!(registry::is_initialized());

    let again = registry::initialize_host(&StaticHost::new((2, 93)));
    assert_eq!(again.unwrap_err(), Error::AlreadyInitialized);
    assert_eq!(registry::layouts().unwrap().version().as_tuple(), (3, 3, 1));

    let binding = Binding::global(&memory).unwrap();
    let rect = Rect::new(binding.from_address("rcti", 0x1000).unwrap()).unwrap();
    rect.set_position(4.0, 8.0).unwrap();
    assert_eq!(rect.position().unwrap(), (4.0, 8.0));
}
