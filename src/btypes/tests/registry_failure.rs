//! A failed initialisation leaves the registry empty

use btypes::registry;
use btypes::schema::{FieldType, Schema};
use btypes::{Error, ResolutionError, StaticHost};

#[test]
fn test_failed_resolution_can_be_retried() {
    let broken = vec![Schema::new("Broken").field("inner", FieldType::schema("Missing"))];
    let err = registry::initialize(&StaticHost::new((3, 0)), broken).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::UnknownSchema { .. })
    ));
    assert!(!registry::is_initialized());

    let table = registry::initialize_host(&StaticHost::new((3, 0))).unwrap();
    assert_eq!(table.layout("rctf").unwrap().size(), 16);
}
