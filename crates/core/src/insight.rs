//! Generic tree walking over an abstract node interface.
//!
//! The host hands code-model nodes over behind this trait; the walkers stop
//! at file boundaries and never assume a concrete syntax tree.

/// A navigable node handle. Handles are cheap to clone; equality compares
/// node identity, not contents.
pub trait TreeNode: Sized + Clone + PartialEq {
    fn parent(&self) -> Option<Self>;
    fn first_child(&self) -> Option<Self>;
    fn next_sibling(&self) -> Option<Self>;

    /// Whether this node is a file boundary walks must not cross.
    fn is_file_boundary(&self) -> bool {
        false
    }
}

/// The node and all its ancestors up to (and including) the file boundary.
pub fn ancestors<N: TreeNode>(node: &N) -> Vec<N> {
    let mut chain = vec![node.clone()];
    let mut current = node.clone();
    while !current.is_file_boundary() {
        let Some(parent) = current.parent() else {
            break;
        };
        chain.push(parent.clone());
        current = parent;
    }
    chain
}

pub fn is_ancestor_of<N: TreeNode>(node: &N, child: &N) -> bool {
    ancestors(child).contains(node)
}

/// Walk upward until a node matches, a stop condition fires, or a file
/// boundary is reached.
pub fn find_parent<N: TreeNode>(
    node: &N,
    mut stop: impl FnMut(&N) -> bool,
    mut matches: impl FnMut(&N) -> bool,
) -> Option<N> {
    let mut current = node.clone();
    loop {
        if matches(&current) {
            return Some(current);
        }
        if current.is_file_boundary() || stop(&current) {
            return None;
        }
        current = current.parent()?;
    }
}

/// First matching child, in sibling order.
pub fn find_child<N: TreeNode>(node: &N, matches: impl FnMut(&N) -> bool) -> Option<N> {
    find_sibling(&node.first_child()?, false, matches)
}

/// First matching sibling. With `strict` the search starts after `node`,
/// otherwise `node` itself is considered.
pub fn find_sibling<N: TreeNode>(
    node: &N,
    strict: bool,
    mut matches: impl FnMut(&N) -> bool,
) -> Option<N> {
    let mut sibling = if strict { node.next_sibling()? } else { node.clone() };
    loop {
        if matches(&sibling) {
            return Some(sibling);
        }
        sibling = sibling.next_sibling()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Toy arena tree: (parent, first_child, next_sibling, kind)
    #[derive(Clone)]
    struct Node {
        index: usize,
        arena: std::rc::Rc<Vec<NodeData>>,
    }

    impl PartialEq for Node {
        fn eq(&self, other: &Self) -> bool {
            self.index == other.index && std::rc::Rc::ptr_eq(&self.arena, &other.arena)
        }
    }

    struct NodeData {
        parent: Option<usize>,
        first_child: Option<usize>,
        next_sibling: Option<usize>,
        kind: &'static str,
    }

    impl TreeNode for Node {
        fn parent(&self) -> Option<Self> {
            self.arena[self.index].parent.map(|index| Node {
                index,
                arena: self.arena.clone(),
            })
        }

        fn first_child(&self) -> Option<Self> {
            self.arena[self.index].first_child.map(|index| Node {
                index,
                arena: self.arena.clone(),
            })
        }

        fn next_sibling(&self) -> Option<Self> {
            self.arena[self.index].next_sibling.map(|index| Node {
                index,
                arena: self.arena.clone(),
            })
        }

        fn is_file_boundary(&self) -> bool {
            self.arena[self.index].kind == "file"
        }
    }

    /// file -> class -> [method -> statement, field]
    fn sample_tree() -> Node {
        let arena = std::rc::Rc::new(vec![
            NodeData {
                parent: None,
                first_child: Some(1),
                next_sibling: None,
                kind: "file",
            },
            NodeData {
                parent: Some(0),
                first_child: Some(2),
                next_sibling: None,
                kind: "class",
            },
            NodeData {
                parent: Some(1),
                first_child: Some(3),
                next_sibling: Some(4),
                kind: "method",
            },
            NodeData {
                parent: Some(2),
                first_child: None,
                next_sibling: None,
                kind: "statement",
            },
            NodeData {
                parent: Some(1),
                first_child: None,
                next_sibling: None,
                kind: "field",
            },
        ]);
        Node { index: 0, arena }
    }

    fn node(root: &Node, index: usize) -> Node {
        Node {
            index,
            arena: root.arena.clone(),
        }
    }

    fn kind_is(kind: &'static str) -> impl FnMut(&Node) -> bool {
        move |n: &Node| n.arena[n.index].kind == kind
    }

    #[test]
    fn find_parent_walks_to_containing_class() {
        let root = sample_tree();
        let statement = node(&root, 3);
        let class = find_parent(&statement, |_| false, kind_is("class"));
        assert_eq!(class.map(|n| n.index), Some(1));
    }

    #[test]
    fn find_parent_respects_stop_condition() {
        let root = sample_tree();
        let statement = node(&root, 3);
        let found = find_parent(&statement, kind_is("method"), kind_is("class"));
        assert!(found.is_none(), "the stop condition fires before the class");
    }

    #[test]
    fn find_parent_does_not_cross_file_boundary() {
        let root = sample_tree();
        let class = node(&root, 1);
        let found = find_parent(&class, |_| false, kind_is("package"));
        assert!(found.is_none());
    }

    #[test]
    fn ancestors_end_at_file() {
        let root = sample_tree();
        let statement = node(&root, 3);
        let chain: Vec<usize> = ancestors(&statement).iter().map(|n| n.index).collect();
        assert_eq!(chain, vec![3, 2, 1, 0]);
    }

    #[test]
    fn is_ancestor_of_matches_chain_membership() {
        let root = sample_tree();
        let class = node(&root, 1);
        let statement = node(&root, 3);
        let field = node(&root, 4);
        assert!(is_ancestor_of(&class, &statement));
        assert!(!is_ancestor_of(&statement, &field));
    }

    #[test]
    fn find_child_scans_siblings_in_order() {
        let root = sample_tree();
        let class = node(&root, 1);
        let field = find_child(&class, kind_is("field"));
        assert_eq!(field.map(|n| n.index), Some(4));
    }

    #[test]
    fn strict_sibling_search_skips_self() {
        let root = sample_tree();
        let method = node(&root, 2);
        let next = find_sibling(&method, true, |_| true);
        assert_eq!(next.map(|n| n.index), Some(4));

        let this = find_sibling(&method, false, kind_is("method"));
        assert_eq!(this.map(|n| n.index), Some(2));
    }
}
