//! A Burkhard-Keller tree over a borrowed word list.
//!
//! An alternate candidate structure for approximate lookups. The main
//! query pipeline goes through the gram index instead; this tree is
//! kept for direct whole-string matching against small word lists.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::distance::{bounded_edit_distance, edit_distance, MatchType};
use crate::encode::code_units;
use crate::types::Key;

struct Node {
    key: Key,
    ///Children by their exact distance to this node
    children: HashMap<u32, Node>,
}

impl Node {
    fn new(key: Key) -> Self {
        Node {
            key,
            children: HashMap::new(),
        }
    }
}

///The tree stores keys into the word list, never the strings
///themselves. The word list must not change while the tree refers to
///it, which the borrow already enforces.
pub struct BkTree<'a> {
    root: Option<Node>,
    size: usize,
    wordlist: &'a [String],
}

impl<'a> BkTree<'a> {
    pub fn new(wordlist: &'a [String]) -> Self {
        BkTree {
            root: None,
            size: 0,
            wordlist,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn word_units(&self, key: Key) -> Vec<u16> {
        code_units(&self.wordlist[key as usize])
    }

    pub fn insert(&mut self, key: Key) {
        debug_assert!((key as usize) < self.wordlist.len());
        let key_units = self.word_units(key);
        let wordlist = self.wordlist;

        let mut current = match self.root {
            Some(ref mut root) => root,
            None => {
                self.root = Some(Node::new(key));
                self.size = 1;
                return;
            }
        };
        loop {
            let node_units = code_units(&wordlist[current.key as usize]);
            let distance = edit_distance(&node_units, &key_units, MatchType::ExactMatch);
            match current.children.entry(distance) {
                Entry::Occupied(occupied) => current = occupied.into_mut(),
                Entry::Vacant(vacant) => {
                    vacant.insert(Node::new(key));
                    self.size += 1;
                    return;
                }
            }
        }
    }

    ///Best whole-string match for `pattern` within `max_typos`.
    pub fn find(&self, pattern: &str, max_typos: u32) -> Option<(Key, u32)> {
        let root = self.root.as_ref()?;
        let pattern_units = code_units(pattern);
        self.find_in(root, &pattern_units, max_typos)
    }

    fn find_in(&self, node: &Node, pattern: &[u16], max_typos: u32) -> Option<(Key, u32)> {
        let node_units = self.word_units(node.key);

        if node.children.is_empty() {
            // We're at a leaf.
            let distance = bounded_edit_distance(&node_units, pattern, max_typos, MatchType::ExactMatch);
            return (distance <= max_typos).then_some((node.key, distance));
        }

        let distance = edit_distance(&node_units, pattern, MatchType::ExactMatch) as i64;
        let mut best: Option<(Key, u32)> = None;

        // Start at the node's own distance ring and jump left to right
        // outwards: [7|5|3|1|*|2|4|6|8]
        let end = distance + max_typos as i64;
        let mut offset: i64 = 0;
        loop {
            let ring = distance + offset;
            if ring >= 0 {
                if let Some(child) = node.children.get(&(ring as u32)) {
                    if let Some(found) = self.find_in(child, pattern, max_typos) {
                        if found.1 == 0 {
                            // Minimum found.
                            return Some(found);
                        }
                        if best.map_or(true, |b| found.1 < b.1) {
                            best = Some(found);
                        }
                    }
                }
            }
            if offset == end {
                break;
            }
            offset = if offset < 0 { -offset } else { -(offset + 1) };
        }

        let own = bounded_edit_distance(&node_units, pattern, max_typos, MatchType::ExactMatch);
        if own <= max_typos && best.map_or(true, |b| own < b.1) {
            // Current node fits better.
            best = Some((node.key, own));
        }
        best
    }
}
