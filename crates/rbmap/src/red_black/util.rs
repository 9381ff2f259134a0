//! Red-black tree surgery on an arena of [`RbNode`]s.
//!
//! None of these helpers fix the link *into* the subtree they return. The
//! caller (the update combinator, or the map for the root) reattaches it.

use log::trace;

use crate::comparator::Comparator;
use crate::error::TreeError;
use crate::util::{first, next};

use super::types::{Color, RbNode};

/// Color of an optional node. Absent nodes are black.
#[inline]
pub fn color_of<K, V>(arena: &[RbNode<K, V>], node: Option<u32>) -> Color {
    node.map_or(Color::Black, |i| arena[i as usize].c)
}

#[inline]
pub fn is_red<K, V>(arena: &[RbNode<K, V>], node: Option<u32>) -> bool {
    color_of(arena, node).is_red()
}

/// Rotate left: the right child `x` takes `h`'s place, `h` becomes `x`'s left
/// child and `x`'s former left subtree becomes `h`'s right subtree. Colors of
/// `h` and `x` are swapped.
///
/// ```text
///   h              x
///  / \            / \
/// .   x    =>    h   .
///    / \        / \
///   +   .      .   +
/// ```
pub fn rotate_left<K, V>(arena: &mut [RbNode<K, V>], h: u32) -> u32 {
    let x = arena[h as usize]
        .r
        .expect("rotate_left requires right child");
    debug_assert!(arena[x as usize].c.is_red());

    let xl = arena[x as usize].l;
    arena[h as usize].r = xl;
    if let Some(xl) = xl {
        arena[xl as usize].p = Some(h);
    }

    arena[x as usize].l = Some(h);
    arena[x as usize].p = arena[h as usize].p;
    arena[h as usize].p = Some(x);

    let c = arena[h as usize].c;
    arena[h as usize].c = arena[x as usize].c;
    arena[x as usize].c = c;

    trace!("rotate left at node {h}, node {x} promoted");
    x
}

/// Rotate right, the mirror of [`rotate_left`].
///
/// ```text
///     h          x
///    / \        / \
///   x   .  =>  .   h
///  / \            / \
/// .   +          +   .
/// ```
pub fn rotate_right<K, V>(arena: &mut [RbNode<K, V>], h: u32) -> u32 {
    let x = arena[h as usize]
        .l
        .expect("rotate_right requires left child");
    debug_assert!(arena[x as usize].c.is_red());

    let xr = arena[x as usize].r;
    arena[h as usize].l = xr;
    if let Some(xr) = xr {
        arena[xr as usize].p = Some(h);
    }

    arena[x as usize].r = Some(h);
    arena[x as usize].p = arena[h as usize].p;
    arena[h as usize].p = Some(x);

    let c = arena[h as usize].c;
    arena[h as usize].c = arena[x as usize].c;
    arena[x as usize].c = c;

    trace!("rotate right at node {h}, node {x} promoted");
    x
}

/// Color flip: `h` turns red, both children turn black.
pub fn recolor<K, V>(arena: &mut [RbNode<K, V>], h: u32) {
    let l = arena[h as usize]
        .l
        .expect("recolor requires left child");
    let r = arena[h as usize]
        .r
        .expect("recolor requires right child");

    arena[h as usize].c = Color::Red;
    arena[l as usize].c = Color::Black;
    arena[r as usize].c = Color::Black;
    trace!("recolor at node {h}");
}

/// Restore the local left-leaning invariants at `h`, returning the node now
/// at the top of the subtree.
///
/// The three rules run in priority order and each one looks at the result
/// of the one before it:
/// 1. right red, left black: rotate left;
/// 2. left red and left-left red: rotate right;
/// 3. both children red: recolor.
///
/// Falling through instead of stopping at the first matching rule is what
/// keeps a right-rotation's two red children from surviving as a red-red
/// edge one level up.
pub fn balance<K, V>(arena: &mut [RbNode<K, V>], mut h: u32) -> u32 {
    if is_red(arena, arena[h as usize].r) && !is_red(arena, arena[h as usize].l) {
        h = rotate_left(arena, h);
    }
    if let Some(l) = arena[h as usize].l {
        if arena[l as usize].c.is_red() && is_red(arena, arena[l as usize].l) {
            h = rotate_right(arena, h);
        }
    }
    if is_red(arena, arena[h as usize].l) && is_red(arena, arena[h as usize].r) {
        recolor(arena, h);
    }
    h
}

/// Leftmost node of the subtree rooted at `node`.
pub fn min<K, V>(arena: &[RbNode<K, V>], mut node: u32) -> u32 {
    while let Some(l) = arena[node as usize].l {
        node = l;
    }
    node
}

/// Unlink the minimum of the subtree rooted at `node`, replacing it with its
/// right child. Returns the new subtree root. The unlinked node keeps its
/// stale links; the caller relinks it.
pub fn delete_min<K, V>(arena: &mut [RbNode<K, V>], node: u32) -> Option<u32> {
    let Some(l) = arena[node as usize].l else {
        return arena[node as usize].r;
    };
    let l = delete_min(arena, l);
    arena[node as usize].l = l;
    if let Some(l) = l {
        arena[l as usize].p = Some(node);
    }
    Some(node)
}

/// Free the arena slot of an unlinked node.
///
/// The last arena element is moved into the vacated slot and every link to
/// it is rewritten. Returns the removed node and the (possibly renumbered)
/// root.
pub fn release<K, V>(
    arena: &mut Vec<RbNode<K, V>>,
    root: Option<u32>,
    idx: u32,
) -> (RbNode<K, V>, Option<u32>) {
    let last = u32::try_from(arena.len() - 1).expect("arena index exceeds u32::MAX");
    let removed = arena.swap_remove(idx as usize);
    if idx == last {
        return (removed, root);
    }

    let moved = &arena[idx as usize];
    let (p, l, r) = (moved.p, moved.l, moved.r);
    if let Some(p) = p {
        let parent = &mut arena[p as usize];
        if parent.l == Some(last) {
            parent.l = Some(idx);
        } else {
            parent.r = Some(idx);
        }
    }
    if let Some(l) = l {
        arena[l as usize].p = Some(idx);
    }
    if let Some(r) = r {
        arena[r as usize].p = Some(idx);
    }

    trace!("released slot {idx}, node {last} renumbered");
    let root = if root == Some(last) { Some(idx) } else { root };
    (removed, root)
}

/// Binary-search-tree checks: root has no parent, every child links back to
/// its parent, in-order keys strictly increase and every arena node is
/// reachable from `root`.
pub fn assert_search_tree<K, V, C>(
    arena: &[RbNode<K, V>],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), TreeError>
where
    C: Comparator<K>,
{
    let Some(root) = root else {
        return if arena.is_empty() {
            Ok(())
        } else {
            Err(TreeError::CountMismatch {
                expected: arena.len(),
                actual: 0,
            })
        };
    };

    if arena[root as usize].p.is_some() {
        return Err(TreeError::RootHasParent);
    }

    fn links<K, V>(arena: &[RbNode<K, V>], node: u32) -> Result<usize, TreeError> {
        let mut count = 1;
        for child in [arena[node as usize].l, arena[node as usize].r]
            .into_iter()
            .flatten()
        {
            if arena[child as usize].p != Some(node) {
                return Err(TreeError::BrokenParentLink { node });
            }
            count += links(arena, child)?;
        }
        Ok(count)
    }

    let actual = links(arena, root)?;
    if actual != arena.len() {
        return Err(TreeError::CountMismatch {
            expected: arena.len(),
            actual,
        });
    }

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if comparator
                .compare(&arena[prev as usize].k, &arena[i as usize].k)
                .is_ge()
            {
                return Err(TreeError::OrderViolated { node: i });
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Red-black color checks: black root, no red node with a red child, equal
/// black height on every path. Returns the black height of the tree.
pub fn assert_red_black_tree<K, V>(
    arena: &[RbNode<K, V>],
    root: Option<u32>,
) -> Result<usize, TreeError> {
    let Some(root) = root else {
        return Ok(0);
    };
    if arena[root as usize].c.is_red() {
        return Err(TreeError::RootNotBlack);
    }

    fn black_height<K, V>(arena: &[RbNode<K, V>], node: Option<u32>) -> Result<usize, TreeError> {
        let Some(node) = node else {
            return Ok(0);
        };
        let n = &arena[node as usize];
        if n.c.is_red() && (is_red(arena, n.l) || is_red(arena, n.r)) {
            return Err(TreeError::RedRedEdge { node });
        }
        let left = black_height(arena, n.l)?;
        let right = black_height(arena, n.r)?;
        if left != right {
            return Err(TreeError::BlackHeightMismatch { node, left, right });
        }
        Ok(left + usize::from(n.c == Color::Black))
    }

    black_height(arena, Some(root))
}
