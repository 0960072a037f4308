//! Intrusive doubly-linked lists
//!
//! The host chains structs through `next`/`prev` pointers embedded in the
//! structs themselves, with a two-pointer `ListBase { first, last }` head.
//! Walking a list reads those pointers straight out of host memory.

use crate::error::{Error, Result};
use crate::layout::ResolvedLayout;
use crate::schema::POINTER_SIZE;
use crate::view::{Binding, View};

use std::fmt;

/// A list head: the addresses of the first and last node
#[derive(Clone, Copy)]
pub struct ListBase<'m> {
    binding: Binding<'m>,
    first: usize,
    last: usize,
    node: Option<&'m ResolvedLayout>,
}

impl<'m> ListBase<'m> {
    pub fn new(
        binding: Binding<'m>,
        first: usize,
        last: usize,
        node: Option<&'m ResolvedLayout>,
    ) -> Self {
        Self {
            binding,
            first,
            last,
            node,
        }
    }

    /// Read the list head stored at `address`
    pub fn read(binding: Binding<'m>, address: usize, node: Option<&'m ResolvedLayout>) -> Result<Self> {
        let memory = binding.memory();
        let first = memory.read_ptr(address)?;
        let last = memory.read_ptr(address + POINTER_SIZE)?;
        Ok(Self::new(binding, first, last, node))
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn last(&self) -> usize {
        self.last
    }

    /// Node layout, if the list head is typed
    pub fn node(&self) -> Option<&'m ResolvedLayout> {
        self.node
    }

    pub fn is_empty(&self) -> bool {
        self.first == 0 && self.last == 0
    }

    /// The same list head, walked as nodes of `schema`
    pub fn with_node(&self, schema: &str) -> Result<Self> {
        let node = self.binding.layouts().layout(schema)?;
        Ok(Self {
            node: Some(node),
            ..*self
        })
    }

    /// Walk the list from the start; every call starts a fresh walk
    pub fn iter(&self) -> Result<ListIter<'m>> {
        let layout = self.node.ok_or(Error::UntypedList)?;
        let links = Links::of(layout)?;
        let anchor = if self.first != 0 { self.first } else { self.last };
        Ok(ListIter {
            binding: self.binding,
            layout,
            links,
            state: Walk::Start(anchor),
        })
    }

    /// Number of nodes reachable by a walk
    pub fn len(&self) -> Result<usize> {
        Ok(self.iter()?.count())
    }

    pub fn get(&self, index: usize) -> Result<Option<View<'m>>> {
        Ok(self.iter()?.nth(index))
    }

    pub fn to_vec(&self) -> Result<Vec<View<'m>>> {
        Ok(self.iter()?.collect())
    }
}

impl fmt::Debug for ListBase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBase")
            .field("first", &format_args!("{:#x}", self.first))
            .field("last", &format_args!("{:#x}", self.last))
            .field("node", &self.node.map(|n| n.name()))
            .finish()
    }
}

/// Offsets of the link pointers inside a node
#[derive(Debug, Clone, Copy)]
struct Links {
    next: usize,
    prev: Option<usize>,
}

impl Links {
    fn of(layout: &ResolvedLayout) -> Result<Self> {
        let next = layout.offset_of("next").ok_or_else(|| Error::UnknownField {
            schema: layout.name().to_string(),
            field: "next".to_string(),
        })?;
        Ok(Self {
            next,
            prev: layout.offset_of("prev"),
        })
    }
}

#[derive(Debug)]
enum Walk {
    Start(usize),
    /// Nodes before the anchor, nearest first; popped from the back
    Backward(Vec<usize>, usize),
    Forward(usize),
    Done,
}

/// Iterator over the nodes of a [`ListBase`]
///
/// Some heads only have `last` set, so the walk anchors on `first` or,
/// failing that, `last`. If the anchor has a predecessor, the `prev` chain
/// is collected first and yielded oldest to newest, then the walk continues
/// forward from the anchor through `next`. Nodes without a `prev` field are
/// walked forward only. The walk ends at the first null pointer; there is
/// no cycle detection.
pub struct ListIter<'m> {
    binding: Binding<'m>,
    layout: &'m ResolvedLayout,
    links: Links,
    state: Walk,
}

impl<'m> ListIter<'m> {
    fn view(&self, address: usize) -> View<'m> {
        View::at(self.binding, self.layout, address)
    }

    fn link(&self, node: usize, offset: usize) -> Option<usize> {
        match self.binding.memory().read_ptr(node + offset) {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::warn!(
                    "Stopping {} list walk at {:#x}: {}",
                    self.layout.name(),
                    node,
                    e
                );
                None
            }
        }
    }

    fn backward(&self, anchor: usize) -> Option<Vec<usize>> {
        let mut nodes = Vec::new();
        if let Some(prev) = self.links.prev {
            let mut node = self.link(anchor, prev)?;
            while node != 0 {
                nodes.push(node);
                node = self.link(node, prev)?;
            }
        }
        Some(nodes)
    }
}

impl<'m> Iterator for ListIter<'m> {
    type Item = View<'m>;

    fn next(&mut self) -> Option<View<'m>> {
        loop {
            match std::mem::replace(&mut self.state, Walk::Done) {
                Walk::Start(0) | Walk::Done | Walk::Forward(0) => return None,
                Walk::Start(anchor) => {
                    let nodes = self.backward(anchor)?;
                    self.state = Walk::Backward(nodes, anchor);
                }
                Walk::Backward(mut nodes, anchor) => match nodes.pop() {
                    Some(node) => {
                        self.state = Walk::Backward(nodes, anchor);
                        return Some(self.view(node));
                    }
                    None => self.state = Walk::Forward(anchor),
                },
                Walk::Forward(node) => {
                    let next = self.link(node, self.links.next)?;
                    self.state = Walk::Forward(next);
                    return Some(self.view(node));
                }
            }
        }
    }
}

/// Walk outward from a node: the node and its `next` chain, then its `prev`
/// chain
pub fn links<'m>(node: View<'m>) -> Result<impl Iterator<Item = View<'m>>> {
    let layout = node.layout();
    let offsets = Links::of(layout)?;
    let binding = node.binding();

    let walk = move |offset: Option<usize>, start: usize| {
        std::iter::successors((start != 0).then_some(start), move |&address| {
            let offset = offset?;
            match binding.memory().read_ptr(address + offset) {
                Ok(0) => None,
                Ok(next) => Some(next),
                Err(e) => {
                    tracing::warn!("Stopping {} link walk at {:#x}: {}", layout.name(), address, e);
                    None
                }
            }
        })
    };

    let prev_start = match offsets.prev {
        Some(prev) => binding.memory().read_ptr(node.address() + prev)?,
        None => 0,
    };

    Ok(walk(Some(offsets.next), node.address())
        .chain(walk(offsets.prev, prev_start))
        .map(move |address| View::at(binding, layout, address)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutTable;
    use crate::memory::{MemorySource, MockMemorySource};
    use crate::schema::{FieldType, Scalar, Schema};

    const BASE: usize = 0x1000;
    const NODE: usize = 0x20;

    fn table() -> LayoutTable {
        let schemas = [
            Schema::new("Link")
                .field("next", FieldType::SelfPointer)
                .field("prev", FieldType::SelfPointer)
                .field("tag", Scalar::U8)
                .field("_pad0", FieldType::chars(7)),
            Schema::new("SingleLink")
                .field("next", FieldType::SelfPointer)
                .field("tag", Scalar::U8),
            Schema::new("Owner")
                .field("items", FieldType::list_of("Link"))
                .field("untyped", FieldType::list()),
        ];
        LayoutTable::resolve(&schemas, (3, 3)).unwrap()
    }

    fn memory() -> MockMemorySource {
        MockMemorySource::new(0x400, BASE)
    }

    /// Node `i` lives at `BASE + NODE * (i + 1)`; the list head is at `BASE`
    fn addr(i: usize) -> usize {
        BASE + NODE * (i + 1)
    }

    fn write_node(memory: &MockMemorySource, i: usize, next: usize, prev: usize) {
        memory.write_ptr(addr(i), next).unwrap();
        memory.write_ptr(addr(i) + POINTER_SIZE, prev).unwrap();
        memory.write_bytes(addr(i) + 2 * POINTER_SIZE, &[b'A' + i as u8]).unwrap();
    }

    fn write_head(memory: &MockMemorySource, first: usize, last: usize) {
        memory.write_ptr(BASE, first).unwrap();
        memory.write_ptr(BASE + POINTER_SIZE, last).unwrap();
    }

    fn tags(list: &ListBase<'_>) -> String {
        list.iter()
            .unwrap()
            .map(|v| v.get_int("tag").unwrap() as u8 as char)
            .collect()
    }

    #[test]
    fn test_walks_in_order_and_restarts() {
        let table = table();
        let memory = memory();
        write_node(&memory, 0, addr(1), 0);
        write_node(&memory, 1, 0, addr(0));
        write_head(&memory, addr(0), addr(1));

        let owner = Binding::new(&memory, &table).from_address("Owner", BASE).unwrap();
        let list = owner.list("items").unwrap();
        assert_eq!(tags(&list), "AB");
        assert_eq!(tags(&list), "AB");
        assert_eq!(list.len().unwrap(), 2);
        assert_eq!(list.get(1).unwrap().map(|v| v.address()), Some(addr(1)));
        assert!(list.get(2).unwrap().is_none());
    }

    #[test]
    fn test_last_only_head() {
        let table = table();
        let memory = memory();
        write_node(&memory, 25, 0, 0);
        write_head(&memory, 0, addr(25));

        let list = Binding::new(&memory, &table).list_at(BASE, Some("Link")).unwrap();
        assert!(!list.is_empty());
        assert_eq!(tags(&list), "Z");
    }

    #[test]
    fn test_backward_then_forward() {
        let table = table();
        let memory = memory();
        write_node(&memory, 0, addr(1), 0);
        write_node(&memory, 1, addr(2), addr(0));
        write_node(&memory, 2, 0, addr(1));
        // Head points at B, which still links back to A
        write_head(&memory, addr(1), addr(2));

        let list = Binding::new(&memory, &table).list_at(BASE, Some("Link")).unwrap();
        assert_eq!(tags(&list), "ABC");
    }

    #[test]
    fn test_empty_and_untyped_lists() {
        let table = table();
        let memory = memory();
        let owner = Binding::new(&memory, &table).from_address("Owner", BASE).unwrap();

        let items = owner.list("items").unwrap();
        assert!(items.is_empty());
        assert_eq!(items.iter().unwrap().count(), 0);

        let untyped = owner.list("untyped").unwrap();
        assert!(untyped.node().is_none());
        assert!(matches!(untyped.iter(), Err(Error::UntypedList)));
        assert!(untyped.with_node("Link").unwrap().iter().is_ok());
        assert!(matches!(untyped.with_node("Nope"), Err(Error::UnknownSchema(_))));
    }

    #[test]
    fn test_singly_linked_nodes_walk_forward_only() {
        let table = table();
        let memory = memory();
        // A "prev" would sit where SingleLink keeps its tag
        memory.write_ptr(addr(0), addr(1)).unwrap();
        memory.write_bytes(addr(0) + POINTER_SIZE, &[7]).unwrap();
        write_head(&memory, addr(0), addr(1));

        let list = Binding::new(&memory, &table).list_at(BASE, Some("SingleLink")).unwrap();
        let nodes = list.to_vec().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].get_int("tag").unwrap(), 7);
    }

    #[test]
    fn test_unreadable_link_ends_walk() {
        let table = table();
        let memory = memory();
        write_node(&memory, 0, 0xdead_0000, 0);
        write_head(&memory, addr(0), addr(0));

        let list = Binding::new(&memory, &table).list_at(BASE, Some("Link")).unwrap();
        // The dangling node cannot be read, so the walk ends before it
        let nodes = list.to_vec().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].address(), addr(0));
    }

    #[test]
    fn test_links_walks_both_directions() {
        let table = table();
        let memory = memory();
        write_node(&memory, 0, addr(1), 0);
        write_node(&memory, 1, addr(2), addr(0));
        write_node(&memory, 2, 0, addr(1));

        let b = Binding::new(&memory, &table).from_address("Link", addr(1)).unwrap();
        let order: Vec<usize> = links(b).unwrap().map(|v| v.address()).collect();
        assert_eq!(order, vec![addr(1), addr(2), addr(0)]);
    }
}
