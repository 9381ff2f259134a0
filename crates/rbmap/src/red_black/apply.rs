//! Update combinator.
//!
//! [`apply`] descends by the comparator to the position of a key, hands the
//! node found there (or `None`) to a [`Transform`] and rebuilds the path on
//! the way back: every ancestor is passed through [`Transform::rebuild`] and
//! its child link and the child's parent link are reattached. Insertion and
//! deletion are the two transforms below.

use std::cmp::Ordering;

use log::trace;

use crate::comparator::Comparator;
use crate::types::KvNode;

use super::types::RbNode;
use super::util::{balance, delete_min, min};

/// Operation applied at the position of [`Transform::key`].
pub trait Transform<K, V> {
    type Output;

    /// Key that steers the descent.
    fn key(&self) -> &K;

    /// Replace the subtree rooted at `node` (`None` if the key is absent)
    /// and return its new root.
    fn apply(self, arena: &mut Vec<RbNode<K, V>>, node: Option<u32>)
        -> (Option<u32>, Self::Output);

    /// Hook run on each ancestor after its child was reattached.
    fn rebuild(_arena: &mut [RbNode<K, V>], node: u32) -> u32 {
        node
    }
}

/// Run `op` at the position of its key in the subtree rooted at `node`.
///
/// The returned subtree root still carries the parent link of `node`; the
/// caller links it in. Recursion depth is the height of the tree.
pub fn apply<K, V, C, T>(
    arena: &mut Vec<RbNode<K, V>>,
    node: Option<u32>,
    comparator: &C,
    op: T,
) -> (Option<u32>, T::Output)
where
    C: Comparator<K>,
    T: Transform<K, V>,
{
    let Some(n) = node else {
        return op.apply(arena, None);
    };

    match comparator.compare(op.key(), &arena[n as usize].k) {
        Ordering::Less => {
            let l = arena[n as usize].l;
            let (child, out) = apply(arena, l, comparator, op);
            arena[n as usize].l = child;
            if let Some(child) = child {
                arena[child as usize].p = Some(n);
            }
            (Some(T::rebuild(arena, n)), out)
        }
        Ordering::Greater => {
            let r = arena[n as usize].r;
            let (child, out) = apply(arena, r, comparator, op);
            arena[n as usize].r = child;
            if let Some(child) = child {
                arena[child as usize].p = Some(n);
            }
            (Some(T::rebuild(arena, n)), out)
        }
        Ordering::Equal => op.apply(arena, Some(n)),
    }
}

/// Insert-or-overwrite. Output is the replaced value.
pub struct Put<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Transform<K, V> for Put<K, V> {
    type Output = Option<V>;

    fn key(&self) -> &K {
        &self.key
    }

    fn apply(
        self,
        arena: &mut Vec<RbNode<K, V>>,
        node: Option<u32>,
    ) -> (Option<u32>, Self::Output) {
        let (n, old) = match node {
            Some(n) => (n, Some(arena[n as usize].set_value(self.value))),
            None => {
                let n = u32::try_from(arena.len()).expect("arena index exceeds u32::MAX");
                arena.push(RbNode::new(self.key, self.value));
                trace!("created node {n}");
                (n, None)
            }
        };
        (Some(balance(arena, n)), old)
    }

    fn rebuild(arena: &mut [RbNode<K, V>], node: u32) -> u32 {
        balance(arena, node)
    }
}

/// Hibbard deletion without color repair. Output is the arena index of the
/// unlinked node, which the caller releases once the path is rebuilt.
pub struct Delete<'a, K, C> {
    pub key: &'a K,
    pub comparator: &'a C,
}

impl<K, V, C> Transform<K, V> for Delete<'_, K, C>
where
    C: Comparator<K>,
{
    type Output = Option<u32>;

    fn key(&self) -> &K {
        self.key
    }

    fn apply(
        self,
        arena: &mut Vec<RbNode<K, V>>,
        node: Option<u32>,
    ) -> (Option<u32>, Self::Output) {
        let Some(d) = node else {
            return (None, None);
        };
        assert!(
            self.comparator.compare(self.key, &arena[d as usize].k) == Ordering::Equal,
            "delete transform reached node {d} holding a different key"
        );

        let replacement = match (arena[d as usize].l, arena[d as usize].r) {
            (Some(l), Some(r)) => {
                let m = min(arena, r);
                let right = delete_min(arena, r);
                arena[m as usize].l = Some(l);
                arena[m as usize].r = right;
                arena[l as usize].p = Some(m);
                if let Some(right) = right {
                    arena[right as usize].p = Some(m);
                }
                Some(m)
            }
            (Some(c), None) | (None, Some(c)) => Some(c),
            (None, None) => None,
        };
        if let Some(x) = replacement {
            arena[x as usize].p = arena[d as usize].p;
        }

        let dn = &mut arena[d as usize];
        dn.p = None;
        dn.l = None;
        dn.r = None;
        trace!("unlinked node {d}, replaced by {replacement:?}");
        (replacement, Some(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use crate::red_black::types::Color;
    use crate::red_black::util::assert_search_tree;

    fn put(arena: &mut Vec<RbNode<i32, i32>>, root: Option<u32>, k: i32) -> Option<u32> {
        let (root, _) = apply(arena, root, &NaturalOrder, Put { key: k, value: k });
        if let Some(r) = root {
            arena[r as usize].p = None;
            arena[r as usize].c = Color::Black;
        }
        root
    }

    #[test]
    fn absent_key_reaches_transform_with_none() {
        let mut arena = Vec::new();
        let root = put(&mut arena, None, 5);
        let (root, removed) = apply(
            &mut arena,
            root,
            &NaturalOrder,
            Delete {
                key: &7,
                comparator: &NaturalOrder,
            },
        );
        assert_eq!(root, Some(0));
        assert_eq!(removed, None);
    }

    #[test]
    #[should_panic(expected = "holding a different key")]
    fn delete_on_mismatched_node_panics() {
        let mut arena = Vec::new();
        let root = put(&mut arena, None, 5);
        let _ = Transform::<i32, i32>::apply(
            Delete {
                key: &7,
                comparator: &NaturalOrder,
            },
            &mut arena,
            root,
        );
    }

    #[test]
    fn put_transform_overwrites_in_place() {
        let mut arena = Vec::new();
        let root = put(&mut arena, None, 5);
        let (top, old) = Transform::<i32, i32>::apply(Put { key: 5, value: 50 }, &mut arena, root);
        assert_eq!(top, Some(0));
        assert_eq!(old, Some(5));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena[0].v, 50);
    }

    #[test]
    fn put_reattaches_parent_links_on_unwind() {
        let mut arena = Vec::new();
        let mut root = None;
        for k in [2, 1, 3] {
            root = put(&mut arena, root, k);
        }
        assert_eq!(root, Some(0));
        assert_eq!(arena[1].p, Some(0));
        assert_eq!(arena[2].p, Some(0));
        assert_eq!(assert_search_tree(&arena, root, &NaturalOrder), Ok(()));
    }

    #[test]
    fn delete_with_two_children_splices_successor() {
        let mut arena = Vec::new();
        let mut root = None;
        for k in [4, 2, 6, 5, 7] {
            root = put(&mut arena, root, k);
        }
        let (root, removed) = apply(
            &mut arena,
            root,
            &NaturalOrder,
            Delete {
                key: &4,
                comparator: &NaturalOrder,
            },
        );
        let removed = removed.expect("key 4 present");
        assert_eq!(arena[removed as usize].k, 4);
        // 6 was promoted above 4 while inserting 7; 5 takes 4's place under it.
        let root = root.expect("tree not empty");
        assert_eq!(arena[root as usize].k, 6);
        let l = arena[root as usize].l.expect("left subtree survives");
        assert_eq!(arena[l as usize].k, 5);
        assert_eq!(arena[l as usize].p, Some(root));
        assert_eq!(arena[removed as usize].l, None);
        assert_eq!(arena[removed as usize].r, None);
    }
}
