//! Node trait definitions.
//!
//! Nodes are stored in a [`Vec`]-backed arena owned by the map. Every
//! "pointer" is an `Option<u32>` index into that arena, so tree-manipulation
//! functions take the arena as a slice (or `&mut Vec<N>` when they allocate
//! or free slots) and work with indices.

/// Tree links (`p`, `l`, `r`).
///
/// `l` and `r` are the structural edges. `p` is a back-reference kept for
/// bookkeeping: it is rewritten on every structural change but nothing
/// descends through it and it never takes part in destruction.
///
/// Read-only: the tree surgery in [`crate::red_black`] writes links on the
/// concrete node type.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
}

/// Key/value node interface used by map-like structures.
///
/// There is no `set_key`: once a node is created its key is never replaced,
/// an overwrite only touches the value.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V) -> V;
}
