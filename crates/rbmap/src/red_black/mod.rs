//! Left-leaning red-black tree over an index arena.

pub mod apply;
pub mod print;
pub mod types;
pub mod util;

pub use types::{Color, RbNode};
pub use util::{assert_red_black_tree, assert_search_tree};
