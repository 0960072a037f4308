//! Typed wrappers with derived properties

use crate::error::Result;
use crate::view::{HostStruct, Rect, View};

use std::collections::HashSet;

/// Modifier bits of `wmEvent.modifier`
const KM_SHIFT: i64 = 1 << 0;
const KM_CTRL: i64 = 1 << 1;
const KM_ALT: i64 = 1 << 2;

/// A window-manager event (`wmEvent`)
#[derive(Debug, Clone, Copy)]
pub struct Event<'m> {
    view: View<'m>,
}

impl<'m> HostStruct<'m> for Event<'m> {
    const SCHEMA: &'static str = "wmEvent";

    fn from_view(view: View<'m>) -> Self {
        Self { view }
    }

    fn view(&self) -> &View<'m> {
        &self.view
    }
}

impl Event<'_> {
    fn modifier(&self) -> Result<i64> {
        self.view.get_int("modifier")
    }

    pub fn ctrl(&self) -> Result<bool> {
        Ok(self.modifier()? & KM_CTRL != 0)
    }

    pub fn shift(&self) -> Result<bool> {
        Ok(self.modifier()? & KM_SHIFT != 0)
    }

    pub fn alt(&self) -> Result<bool> {
        Ok(self.modifier()? & KM_ALT != 0)
    }

    /// Raw event type code
    pub fn event_type(&self) -> Result<i64> {
        self.view.get_int("type")
    }

    pub fn value(&self) -> Result<i64> {
        self.view.get_int("val")
    }

    /// Cursor position in window coordinates
    pub fn position(&self) -> Result<(i64, i64)> {
        Ok((self.view.get_int("posx")?, self.view.get_int("posy")?))
    }
}

/// Runtime state of a text editor space (`SpaceText_Runtime`)
#[derive(Debug, Clone, Copy)]
pub struct TextRuntime<'m> {
    view: View<'m>,
}

impl<'m> HostStruct<'m> for TextRuntime<'m> {
    const SCHEMA: &'static str = "SpaceText_Runtime";

    fn from_view(view: View<'m>) -> Self {
        Self { view }
    }

    fn view(&self) -> &View<'m> {
        &self.view
    }
}

impl TextRuntime<'_> {
    /// Line height in pixels
    ///
    /// The stored value excludes line spacing, which the host draws at 30%.
    pub fn lheight_px(&self) -> Result<i64> {
        let stored = self.view.get_int("_lheight_px")?;
        Ok((stored as f64 * 1.3) as i64)
    }

    /// Left padding in pixels, including the line number gutter
    pub fn lpad_px(&self) -> Result<i64> {
        let cwidth = self.view.get_int("cwidth_px")?;
        let lnum = self.view.get_int("lnum")?;
        Ok(cwidth * (lnum + 3))
    }

    pub fn viewlines(&self) -> Result<i64> {
        self.view.get_int("viewlines")
    }
}

/// A screen area (`ScrArea`)
#[derive(Debug, Clone, Copy)]
pub struct Area<'m> {
    view: View<'m>,
}

impl<'m> HostStruct<'m> for Area<'m> {
    const SCHEMA: &'static str = "ScrArea";

    fn from_view(view: View<'m>) -> Self {
        Self { view }
    }

    fn view(&self) -> &View<'m> {
        &self.view
    }
}

impl<'m> Area<'m> {
    /// Action zones, from the list's `first` entry back through `prev`
    pub fn action_zones(&self) -> Result<Vec<View<'m>>> {
        let binding = self.view.binding();
        let mut seen = HashSet::new();
        let mut zones = Vec::new();
        let mut address = self.view.list("actionzones")?.first();

        while address != 0 && seen.insert(address) {
            let zone = binding.from_address("AZone", address)?;
            match zone.get_ptr("prev") {
                Ok(prev) => address = prev,
                Err(e) => {
                    tracing::warn!("Stopping action zone walk at {:#x}: {}", address, e);
                    break;
                }
            }
            zones.push(zone);
        }
        Ok(zones)
    }

    /// Area bounds in screen coordinates
    pub fn rect(&self) -> Result<Rect<'m>> {
        self.view.rect("totrct")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::declarations;
    use crate::layout::LayoutTable;
    use crate::memory::{MemorySource, MockMemorySource};
    use crate::schema::POINTER_SIZE;
    use crate::view::Binding;
    use crate::Value;

    const BASE: usize = 0x1000;

    #[test]
    fn test_event_modifiers() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(256, BASE);
        let event: Event = Binding::new(&memory, &table).cast(BASE).unwrap();

        event.view().set("modifier", Value::Char(0b011)).unwrap();
        assert!(event.ctrl().unwrap());
        assert!(event.shift().unwrap());
        assert!(!event.alt().unwrap());

        event.view().set("modifier", Value::Char(0b100)).unwrap();
        assert!(event.alt().unwrap());
        assert!(!event.ctrl().unwrap());

        event.view().set("posx", 120).unwrap();
        event.view().set("posy", -4).unwrap();
        assert_eq!(event.position().unwrap(), (120, -4));
    }

    #[test]
    fn test_text_runtime_metrics() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(256, BASE);
        let runtime: TextRuntime = Binding::new(&memory, &table).cast(BASE).unwrap();

        runtime.view().set("_lheight_px", 17).unwrap();
        runtime.view().set("cwidth_px", 9).unwrap();
        runtime.view().set("lnum", 2).unwrap();
        assert_eq!(runtime.lheight_px().unwrap(), 22);
        assert_eq!(runtime.lpad_px().unwrap(), 45);
    }

    #[test]
    fn test_action_zones_follow_prev_from_first() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(0x1000, BASE);
        let binding = Binding::new(&memory, &table);
        let area: Area = binding.cast(BASE).unwrap();
        assert!(area.action_zones().unwrap().is_empty());
        assert_eq!(area.rect().unwrap().width().unwrap(), 0.0);

        let zones = [BASE + 0x800, BASE + 0x900, BASE + 0xa00];
        let head = BASE + area.view().offset_of("actionzones").unwrap();
        memory.write_ptr(head, zones[0]).unwrap();
        memory.write_ptr(head + POINTER_SIZE, zones[1]).unwrap();
        for pair in zones.windows(2) {
            let zone = binding.from_address("AZone", pair[0]).unwrap();
            zone.set_ptr("prev", pair[1]).unwrap();
        }
        binding
            .from_address("AZone", zones[2])
            .unwrap()
            .set("type", 4)
            .unwrap();

        let walked = area.action_zones().unwrap();
        let addresses: Vec<usize> = walked.iter().map(|z| z.address()).collect();
        assert_eq!(addresses, zones);
        assert_eq!(walked[2].get_int("type").unwrap(), 4);
        assert_eq!(walked[0].schema(), "AZone");
    }

    #[test]
    fn test_action_zones_stop_on_cycles_and_bad_links() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(0x1000, BASE);
        let binding = Binding::new(&memory, &table);
        let area: Area = binding.cast(BASE).unwrap();
        let head = BASE + area.view().offset_of("actionzones").unwrap();

        let zone = BASE + 0x800;
        memory.write_ptr(head, zone).unwrap();
        binding.from_address("AZone", zone).unwrap().set_ptr("prev", zone).unwrap();
        assert_eq!(area.action_zones().unwrap().len(), 1);

        // A prev link into unmapped memory ends the walk after the last readable zone
        binding
            .from_address("AZone", zone)
            .unwrap()
            .set_ptr("prev", 0x10)
            .unwrap();
        let walked = area.action_zones().unwrap();
        assert_eq!(walked.len(), 1);
        assert_eq!(walked[0].address(), zone);
    }

    #[test]
    fn test_bind_from_handle() {
        let table = LayoutTable::resolve(&declarations(), (3, 3)).unwrap();
        let memory = MockMemorySource::new(256, BASE);
        let binding = Binding::new(&memory, &table);

        let event: Event = binding.bind(&Some(BASE)).unwrap();
        assert_eq!(event.view().address(), BASE);
        assert!(binding.bind::<Event>(&None::<usize>).is_err());
    }
}
