use crate::tree::parser::ParsedSource;
use tree_sitter::Node;

/// The ordered chain of nodes from the root of a compilation unit down to
/// one candidate leaf.
///
/// A path never owns tree data; it borrows the [`ParsedSource`] it was
/// built from, so the owning unit stays reachable from any path.
pub struct TreePath<'a> {
    unit: &'a ParsedSource<'a>,
    nodes: Vec<Node<'a>>,
}

impl<'a> TreePath<'a> {
    /// Build the path to `leaf` by walking parent links up to the root.
    pub fn from_leaf(unit: &'a ParsedSource<'a>, leaf: Node<'a>) -> Self {
        let mut nodes = vec![leaf];
        let mut current = leaf;
        while let Some(parent) = current.parent() {
            nodes.push(parent);
            current = parent;
        }
        nodes.reverse();
        TreePath { unit, nodes }
    }

    /// The compilation unit this path belongs to.
    pub fn unit(&self) -> &'a ParsedSource<'a> {
        self.unit
    }

    /// The node this path leads to.
    pub fn leaf(&self) -> Node<'a> {
        self.nodes[self.nodes.len() - 1]
    }

    /// All nodes of the chain, root first.
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// Iterate the chain from the leaf up to the root.
    pub fn iter_to_root(&self) -> impl Iterator<Item = Node<'a>> + '_ {
        self.nodes.iter().rev().copied()
    }
}

/// Iterate the named children of a node in declaration order.
pub fn named_children<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
    (0..node.named_child_count()).filter_map(move |i| node.named_child(i))
}

/// Deterministic pre-order traversal over the named nodes of a subtree.
///
/// This is the numbering traversal for every positional convention in the
/// matcher: occurrence offsets and declaration ordinals count hits in this
/// order, so identical sources always number identically.
pub fn preorder(root: Node<'_>) -> Preorder<'_> {
    Preorder { stack: vec![root] }
}

pub struct Preorder<'t> {
    stack: Vec<Node<'t>>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        let node = self.stack.pop()?;
        self.stack.extend(
            (0..node.named_child_count())
                .rev()
                .filter_map(|i| node.named_child(i)),
        );
        Some(node)
    }
}
