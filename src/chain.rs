//! Chain: one bucket of the set, a singly linked list of distinct values.
//!
//! Nodes live in a per-chain slot arena and link to each other by key, so
//! the chain owns every node it ever allocated. Dropping the chain drops the
//! arena, which releases the whole list and not just its head.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Clone, Debug)]
struct Node {
    value: i32,
    next: Option<NodeKey>,
}

/// Result of one scan over a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    pub found: bool,
    /// Nodes visited: the 1-based position on a hit, the full length on a miss.
    pub visited: usize,
}

/// Singly linked list of distinct values, most recently inserted first.
#[derive(Clone, Debug, Default)]
pub struct Chain {
    nodes: SlotMap<NodeKey, Node>,
    head: Option<NodeKey>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes. The arena holds exactly the linked nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walks the list from the head until `v` is found or the list ends.
    pub fn probe(&self, v: i32) -> Probe {
        let mut visited = 0;
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            visited += 1;
            if node.value == v {
                return Probe {
                    found: true,
                    visited,
                };
            }
            cursor = node.next;
        }
        Probe {
            found: false,
            visited,
        }
    }

    pub fn contains(&self, v: i32) -> bool {
        self.probe(v).found
    }

    pub fn probe_count(&self, v: i32) -> usize {
        self.probe(v).visited
    }

    /// Prepends `v` unless already present. Returns whether it was added.
    pub fn insert(&mut self, v: i32) -> bool {
        !self.insert_scanned(v).found
    }

    /// Like `insert`, but reports the duplicate scan it performed: `found`
    /// means `v` was already present and nothing changed.
    pub fn insert_scanned(&mut self, v: i32) -> Probe {
        let p = self.probe(v);
        if !p.found {
            let next = self.head;
            self.head = Some(self.nodes.insert(Node { value: v, next }));
        }
        p
    }

    /// Unlinks and frees the node holding `v`. Returns whether one existed.
    pub fn remove(&mut self, v: i32) -> bool {
        let mut prev: Option<NodeKey> = None;
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if node.value == v {
                let next = node.next;
                match prev {
                    None => self.head = next,
                    Some(p) => self.nodes[p].next = next,
                }
                self.nodes.remove(k);
                return true;
            }
            prev = cursor;
            cursor = node.next;
        }
        false
    }

    /// Values from head to tail. Each call starts over from the current head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward cursor over a chain.
///
/// Two cursors are equal when they sit on the same node of the same chain;
/// exhausted cursors of one chain are all equal.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    nodes: &'a SlotMap<NodeKey, Node>,
    cursor: Option<NodeKey>,
}

impl Iter<'_> {
    pub(crate) fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<i32> {
        let node = &self.nodes[self.cursor?];
        self.cursor = node.next;
        Some(node.value)
    }
}

impl core::iter::FusedIterator for Iter<'_> {}

impl PartialEq for Iter<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.nodes, other.nodes) && self.cursor == other.cursor
    }
}

impl Eq for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(values: &[i32]) -> Chain {
        let mut c = Chain::new();
        for &v in values {
            c.insert(v);
        }
        c
    }

    #[test]
    fn insert_prepends_and_rejects_duplicates() {
        let mut c = Chain::new();
        assert!(c.is_empty());
        assert!(c.insert(1));
        assert!(c.insert(2));
        assert!(c.insert(3));
        assert!(!c.insert(2));
        assert_eq!(c.len(), 3);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn remove_head_middle_and_tail() {
        let mut c = chain_of(&[1, 2, 3, 4]);
        // Order is 4, 3, 2, 1.
        assert!(c.remove(4));
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert!(c.remove(2));
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![3, 1]);
        assert!(c.remove(1));
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![3]);
        assert!(!c.remove(1));
        assert!(c.remove(3));
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(!c.remove(3), "removing from an empty chain is a no-op");
    }

    #[test]
    fn probe_counts_visited_nodes() {
        let c = chain_of(&[10, 20, 30]);
        // Order is 30, 20, 10.
        assert_eq!(c.probe(30), Probe { found: true, visited: 1 });
        assert_eq!(c.probe(10), Probe { found: true, visited: 3 });
        assert_eq!(c.probe(99), Probe { found: false, visited: 3 });
        assert_eq!(Chain::new().probe_count(1), 0);
        assert!(c.contains(20));
        assert!(!c.contains(21));
    }

    #[test]
    fn iteration_restarts_from_current_head() {
        let mut c = chain_of(&[1, 2]);
        let mut it = c.iter();
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);

        c.insert(3);
        assert_eq!((&c).into_iter().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn cursor_equality_is_positional() {
        let c = chain_of(&[1, 2, 3]);
        let a = c.iter();
        let mut b = c.iter();
        assert_eq!(a, b);
        b.next();
        assert_ne!(a, b);

        let mut a2 = a.clone();
        a2.next();
        assert_eq!(a2, b);

        let other = chain_of(&[1, 2, 3]);
        assert_ne!(c.iter(), other.iter(), "cursors of different chains differ");
    }

    #[test]
    fn insert_scanned_reports_single_walk() {
        let mut c = Chain::new();
        assert_eq!(c.insert_scanned(7), Probe { found: false, visited: 0 });
        assert!(c.remove(7));

        let mut c = chain_of(&[1, 2, 3]);
        // 1 sits at the tail; nothing is linked.
        assert_eq!(c.insert_scanned(1), Probe { found: true, visited: 3 });
        assert_eq!(c.len(), 3);
        // Miss walks the whole chain, then prepends.
        assert_eq!(c.insert_scanned(4), Probe { found: false, visited: 3 });
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn len_tracks_linked_nodes() {
        let mut c = Chain::new();
        for v in 0..20 {
            c.insert(v);
        }
        for v in (0..20).step_by(3) {
            c.remove(v);
        }
        c.insert(5);
        c.remove(100);
        c.insert(0);
        assert_eq!(c.len(), c.iter().count());
        assert_eq!(c.len(), 14);
    }

    #[test]
    fn slots_are_reused_after_removal() {
        let mut c = Chain::new();
        for round in 0..10 {
            for v in 0..50 {
                assert!(c.insert(v + round));
            }
            for v in 0..50 {
                assert!(c.remove(v + round));
            }
            assert!(c.is_empty());
        }
        assert_eq!(c.len(), 0);
    }
}
