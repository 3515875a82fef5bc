use loom_ir::SyntaxKind;

use super::{GreenElement, GreenNode, GreenToken};

/// Position in the child list to which a node can later be wrapped.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Checkpoint(usize);

/// Bottom-up tree construction.
///
/// Children accumulate on a flat stack; [`NodeBuilder::finish_node`] pops
/// everything since the matching [`NodeBuilder::start_node`] into a new node.
/// Checkpoints let a parser decide the kind of a node after parsing its first
/// child, which is how left-associative binary expressions are built.
#[derive(Default, Debug)]
pub struct NodeBuilder {
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        NodeBuilder::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Close the innermost open node. Does nothing when no node is open.
    pub fn finish_node(&mut self) {
        let Some((kind, first)) = self.parents.pop() else {
            return;
        };
        let node = GreenNode::new(kind, self.children.drain(first..));
        self.children.push(GreenElement::Node(node));
    }

    pub fn token(&mut self, token: GreenToken) {
        self.children.push(GreenElement::Token(token));
    }

    /// Add a finished node, for example one reused from an older tree.
    pub fn node(&mut self, node: GreenNode) {
        self.children.push(GreenElement::Node(node));
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Open a node that adopts every child added since `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let Checkpoint(first) = checkpoint;
        debug_assert!(
            first <= self.children.len(),
            "checkpoint {first} is past the child stack"
        );
        debug_assert!(
            self.parents.last().map_or(true, |&(_, open)| open <= first),
            "checkpoint precedes the innermost open node"
        );
        self.parents.push((kind, first.min(self.children.len())));
    }

    /// Total width of everything added so far.
    pub fn width(&self) -> u32 {
        self.children.iter().map(GreenElement::width).sum()
    }

    /// Close all open nodes and return the root.
    ///
    /// If the outermost level holds anything but a single node, the children
    /// are wrapped in a [`SyntaxKind::CompilationUnit`].
    pub fn finish(mut self) -> GreenNode {
        while !self.parents.is_empty() {
            self.finish_node();
        }
        if let [GreenElement::Node(node)] = self.children.as_slice() {
            return node.clone();
        }
        GreenNode::new(SyntaxKind::CompilationUnit, self.children)
    }
}
