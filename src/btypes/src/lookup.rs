//! Space and region type discovery
//!
//! The host keeps one `SpaceType` per editor, chained through every area's
//! `type` pointer, and each space type lists its `ARegionType`s. Region
//! types never move once registered, so their addresses are memoised per
//! `(space, region)` pair.

use crate::defs::{area_to_enum, region_to_enum};
use crate::error::{Error, Result};
use crate::listbase::links;
use crate::view::View;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

static REGION_TYPES: Lazy<RegionTypeCache> = Lazy::new(RegionTypeCache::new);

/// Find the `SpaceType` registered for an area type name
///
/// `area` is any `ScrArea`; all space types are reachable from its `type`.
pub fn space_type<'m>(area: &View<'m>, space: &str) -> Result<View<'m>> {
    let id = area_to_enum(space)? as i64;
    let start = area
        .deref("type")?
        .ok_or_else(|| Error::NotFound(format!("'{}' does not exist", space)))?;

    for candidate in links(start)? {
        if candidate.get_int("spaceid")? == id {
            return Ok(candidate);
        }
    }
    Err(Error::NotFound(format!("'{}' does not exist", space)))
}

/// Find the `ARegionType` of `region` within `space`, using the global cache
pub fn region_type<'m>(area: &View<'m>, space: &str, region: &str) -> Result<View<'m>> {
    REGION_TYPES.get_or_find(area, space, region)
}

/// Memo of region type addresses keyed by `(space, region)`
#[derive(Debug, Default)]
pub struct RegionTypeCache {
    entries: Mutex<HashMap<(String, String), usize>>,
}

impl RegionTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_find<'m>(&self, area: &View<'m>, space: &str, region: &str) -> Result<View<'m>> {
        let key = (space.to_string(), region.to_string());
        let cached = self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .copied();
        if let Some(address) = cached {
            return area.binding().from_address("ARegionType", address);
        }

        let found = find_region_type(area, space, region)?;
        tracing::debug!("Found {} region type for {} at {:#x}", region, space, found.address());
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, found.address());
        Ok(found)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

fn find_region_type<'m>(area: &View<'m>, space: &str, region: &str) -> Result<View<'m>> {
    let id = region_to_enum(region)? as i64;
    let space_type = space_type(area, space)?;
    for candidate in space_type.list("regiontypes")?.iter()? {
        if candidate.get_int("regionid")? == id {
            return Ok(candidate);
        }
    }
    Err(Error::NotFound(format!("No '{}' exists for '{}'", region, space)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::{RGN_TYPE_HEADER, RGN_TYPE_WINDOW, SPACE_TEXT, SPACE_VIEW3D};
    use crate::host::declarations;
    use crate::layout::LayoutTable;
    use crate::memory::{MemorySource, MockMemorySource};
    use crate::schema::POINTER_SIZE;
    use crate::view::Binding;

    const BASE: usize = 0x10000;
    const AREA: usize = BASE;
    const VIEW3D: usize = BASE + 0x1000;
    const TEXT: usize = BASE + 0x2000;
    const WINDOW_REGION: usize = BASE + 0x3000;
    const HEADER_REGION: usize = BASE + 0x3800;

    /// One area pointing at the 3D view space type, which links to the
    /// text editor space type with two region types
    fn setup(table: &LayoutTable, memory: &MockMemorySource) {
        let binding = Binding::new(memory, table);
        let area = binding.from_address("ScrArea", AREA).unwrap();
        area.set_ptr("type", VIEW3D).unwrap();

        let view3d = binding.from_address("SpaceType", VIEW3D).unwrap();
        view3d.set("spaceid", SPACE_VIEW3D).unwrap();
        view3d.set_ptr("next", TEXT).unwrap();

        let text = binding.from_address("SpaceType", TEXT).unwrap();
        text.set("spaceid", SPACE_TEXT).unwrap();
        text.set_ptr("prev", VIEW3D).unwrap();
        let head = text.address() + text.offset_of("regiontypes").unwrap();
        memory.write_ptr(head, WINDOW_REGION).unwrap();
        memory.write_ptr(head + POINTER_SIZE, HEADER_REGION).unwrap();

        let window = binding.from_address("ARegionType", WINDOW_REGION).unwrap();
        window.set("regionid", RGN_TYPE_WINDOW).unwrap();
        window.set_ptr("next", HEADER_REGION).unwrap();
        let header = binding.from_address("ARegionType", HEADER_REGION).unwrap();
        header.set("regionid", RGN_TYPE_HEADER).unwrap();
        header.set_ptr("prev", WINDOW_REGION).unwrap();
    }

    #[test]
    fn test_space_type_walks_links() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(0x4000, BASE);
        setup(&table, &memory);
        let area = Binding::new(&memory, &table).from_address("ScrArea", AREA).unwrap();

        assert_eq!(space_type(&area, "VIEW_3D").unwrap().address(), VIEW3D);
        assert_eq!(space_type(&area, "TEXT_EDITOR").unwrap().address(), TEXT);
        assert!(matches!(space_type(&area, "CONSOLE"), Err(Error::NotFound(_))));
        assert!(matches!(
            space_type(&area, "NOT_AN_EDITOR"),
            Err(Error::UnknownName { kind: "area", .. })
        ));
    }

    #[test]
    fn test_region_type_is_memoised() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(0x4000, BASE);
        setup(&table, &memory);
        let area = Binding::new(&memory, &table).from_address("ScrArea", AREA).unwrap();
        let cache = RegionTypeCache::new();

        let header = cache.get_or_find(&area, "TEXT_EDITOR", "HEADER").unwrap();
        assert_eq!(header.address(), HEADER_REGION);
        assert_eq!(cache.len(), 1);

        // Break the space type chain; the cached entry still answers
        area.set_ptr("type", 0).unwrap();
        let again = cache.get_or_find(&area, "TEXT_EDITOR", "HEADER").unwrap();
        assert_eq!(again.address(), HEADER_REGION);
        assert!(cache.get_or_find(&area, "TEXT_EDITOR", "WINDOW").is_err());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_region_type() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(0x4000, BASE);
        setup(&table, &memory);
        let area = Binding::new(&memory, &table).from_address("ScrArea", AREA).unwrap();

        let err = RegionTypeCache::new()
            .get_or_find(&area, "TEXT_EDITOR", "FOOTER")
            .unwrap_err();
        assert_eq!(err, Error::NotFound("No 'FOOTER' exists for 'TEXT_EDITOR'".into()));
    }
}
