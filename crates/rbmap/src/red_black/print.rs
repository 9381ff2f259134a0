use std::fmt::Debug;

use super::types::{Color, RbNode};

/// Debug printer for red-black trees.
///
/// Non-root nodes end with `^p`, the arena index of their parent, so a
/// broken back-reference shows up next to the edge it contradicts.
pub fn print<K, V>(arena: &[RbNode<K, V>], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = match n.c {
                Color::Black => "black",
                Color::Red => "red",
            };
            let parent = n.p.map(|p| format!(" ^{p}")).unwrap_or_default();
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] {color} {{ {:?} = {:?} }}{parent}\n{tab}L={left}\n{tab}R={right}",
                n.k, n.v
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_carry_parent_index() {
        let mut arena = vec![RbNode::new(2, 'b'), RbNode::new(1, 'a')];
        arena[0].c = Color::Black;
        arena[0].l = Some(1);
        arena[1].p = Some(0);

        let out = print(&arena, Some(0), "");
        assert_eq!(
            out,
            "Node[0] black { 2 = 'b' }\nL=Node[1] red { 1 = 'a' } ^0\n  L=∅\n  R=∅\nR=∅"
        );
    }

    #[test]
    fn empty_tree_prints_empty_set() {
        let arena: Vec<RbNode<i32, i32>> = Vec::new();
        assert_eq!(print(&arena, None, ""), "∅");
    }
}
