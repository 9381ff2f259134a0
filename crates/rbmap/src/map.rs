use std::fmt;

use log::{debug, trace};

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::TreeError;
use crate::red_black::apply::{apply, Delete, Put};
use crate::red_black::print::print;
use crate::red_black::util::{assert_red_black_tree, assert_search_tree, release};
use crate::red_black::{Color, RbNode};
use crate::types::KvNode;
use crate::util::{find, height};

fn rb_key<K, V>(node: &RbNode<K, V>) -> &K {
    node.key()
}

/// Ordered map backed by a left-leaning red-black tree.
///
/// The map owns its keys and values. Every node lives in an internal arena
/// and no reference to a node outlives a `&self` borrow. Dropping the map
/// drops each key and value exactly once.
///
/// Insertion keeps the tree balanced. Deletion is plain Hibbard deletion
/// without color repair: afterwards [`check_red_black`](Self::check_red_black)
/// may fail and heights are no longer guaranteed logarithmic, while
/// [`validate`](Self::validate) keeps holding.
///
/// Nodes are addressed by `u32` arena indices, so a map holds at most
/// `u32::MAX` entries; inserting beyond that panics.
///
/// ```
/// use rbmap::RbMap;
///
/// let mut map = RbMap::new();
/// map.put("b", 1);
/// map.put("a", 2);
/// map.put("c", 3);
///
/// assert_eq!(map.root_key(), Some(&"b"));
/// assert_eq!(map.get(&"a"), Some(&2));
/// assert!(!map.contains(&"z"));
///
/// assert_eq!(map.delete(&"b"), Some(1));
/// assert!(!map.contains(&"b"));
/// ```
pub struct RbMap<K, V, C = NaturalOrder>
where
    C: Comparator<K>,
{
    arena: Vec<RbNode<K, V>>,
    root: Option<u32>,
    comparator: C,
}

impl<K: Ord, V> RbMap<K, V, NaturalOrder> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord, V> Default for RbMap<K, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbMap<K, V, C>
where
    C: Comparator<K>,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    /// Associates `value` with `key`, returning the value it replaced.
    ///
    /// On overwrite the stored key is kept and the passed `key` is dropped.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (root, old) = apply(
            &mut self.arena,
            self.root,
            &self.comparator,
            Put { key, value },
        );
        self.set_root(root);
        if let Some(r) = self.root {
            self.arena[r as usize].c = Color::Black;
        }
        if old.is_some() {
            trace!("overwrote value, len {}", self.len());
        }
        old
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.arena[i as usize].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find(key)?;
        Some(self.arena[i as usize].value_mut())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let (root, removed) = apply(
            &mut self.arena,
            self.root,
            &self.comparator,
            Delete {
                key,
                comparator: &self.comparator,
            },
        );
        self.set_root(root);

        let idx = removed?;
        let (node, root) = release(&mut self.arena, self.root, idx);
        self.root = root;
        Some(node.into_kv().1)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        debug!("clearing map with {} entries", self.arena.len());
        self.arena.clear();
        self.root = None;
    }

    /// Node count of the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|r| self.arena[r as usize].key())
    }

    pub fn root_color(&self) -> Option<Color> {
        self.root.map(|r| self.arena[r as usize].c)
    }

    /// Checks the search-tree invariants: root without parent, consistent
    /// parent links, strictly increasing in-order keys and every stored
    /// entry reachable from the root.
    pub fn validate(&self) -> Result<(), TreeError> {
        assert_search_tree(&self.arena, self.root, &self.comparator)
    }

    /// Checks the red-black color invariants and returns the black height.
    ///
    /// Holds for maps modified only through [`put`](Self::put).
    pub fn check_red_black(&self) -> Result<usize, TreeError> {
        assert_red_black_tree(&self.arena, self.root)
    }

    fn find(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, rb_key, &self.comparator)
    }

    fn set_root(&mut self, root: Option<u32>) {
        if let Some(r) = root {
            self.arena[r as usize].p = None;
        }
        self.root = root;
    }
}

impl<K, V, C> fmt::Debug for RbMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RbMap(len={}) {}", self.len(), print(&self.arena, self.root, ""))
    }
}

impl<K, V, C> Extend<(K, V)> for RbMap<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbMap<K, V, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
