//! Ordered key/value map on a left-leaning red-black tree.
//!
//! Keys are ordered by a caller-supplied [`Comparator`]; [`NaturalOrder`]
//! (delegating to [`Ord`]) is the default. Nodes are kept in a `Vec` arena
//! and linked by `Option<u32>` indices, with parent indices maintained as
//! bookkeeping alongside the owning child links.
//!
//! Insertion and deletion share one update combinator
//! ([`red_black::apply::apply`]) that descends by the comparator, applies an
//! operation-specific transform at the key's position and rebuilds the path
//! back to the root.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait and [`KvNode`] accessors |
//! [`comparator`] | [`Comparator`] trait and [`NaturalOrder`] |
//! [`util`] | link-walking helpers (`first`, `next`, `height`, `find`) |
//! [`red_black`] | node type, rotations, balancer, update combinator |
//! [`map`] | [`RbMap`] |
//!
//! The map is single-threaded; callers sharing one across threads wrap the
//! whole map in a lock.

pub mod comparator;
pub mod error;
pub mod map;
pub mod red_black;
pub mod types;
pub mod util;

pub use comparator::{Comparator, NaturalOrder};
pub use error::TreeError;
pub use map::RbMap;
pub use red_black::{Color, RbNode};
pub use types::{KvNode, Node};
