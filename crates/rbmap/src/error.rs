use thiserror::Error;

/// Structural check failures reported by [`RbMap::validate`] and
/// [`RbMap::check_red_black`].
///
/// Node positions are arena indices.
///
/// [`RbMap::validate`]: crate::RbMap::validate
/// [`RbMap::check_red_black`]: crate::RbMap::check_red_black
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("root has parent")]
    RootHasParent,
    #[error("root is not black")]
    RootNotBlack,
    #[error("broken parent link below node {node}")]
    BrokenParentLink { node: u32 },
    #[error("red node {node} has a red child")]
    RedRedEdge { node: u32 },
    #[error("black height mismatch at node {node}: left {left}, right {right}")]
    BlackHeightMismatch { node: u32, left: usize, right: usize },
    #[error("node order violated at node {node}")]
    OrderViolated { node: u32 },
    #[error("reachable node count {actual} does not match length {expected}")]
    CountMismatch { expected: usize, actual: usize },
}
