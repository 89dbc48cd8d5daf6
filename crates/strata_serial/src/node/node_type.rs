use alloc::string::String;
use core::fmt;
use core::ops::Deref;

use crate::node::{DataNode, MappingNode, NodeKind, SequenceNode, ValueNode};
use crate::validation::{ErrorNode, ValidationNode};

// -----------------------------------------------------------------------------
// NodeType

/// The node shape a serializer consumes.
///
/// Implemented for the three concrete node structs and for [`DataNode`]
/// itself, which accepts any shape.
pub trait NodeType: Clone + Into<DataNode> + fmt::Debug + Send + Sync + 'static {
    /// The required kind, `None` when every kind is accepted.
    const KIND: Option<NodeKind>;

    /// Views `node` as `Self` if the kinds match.
    fn from_node(node: &DataNode) -> Option<&Self>;
}

impl NodeType for DataNode {
    const KIND: Option<NodeKind> = None;

    #[inline]
    fn from_node(node: &DataNode) -> Option<&Self> {
        Some(node)
    }
}

impl NodeType for ValueNode {
    const KIND: Option<NodeKind> = Some(NodeKind::Value);

    #[inline]
    fn from_node(node: &DataNode) -> Option<&Self> {
        node.as_value()
    }
}

impl NodeType for SequenceNode {
    const KIND: Option<NodeKind> = Some(NodeKind::Sequence);

    #[inline]
    fn from_node(node: &DataNode) -> Option<&Self> {
        node.as_sequence()
    }
}

impl NodeType for MappingNode {
    const KIND: Option<NodeKind> = Some(NodeKind::Mapping);

    #[inline]
    fn from_node(node: &DataNode) -> Option<&Self> {
        node.as_mapping()
    }
}

/// Message used when a node has the wrong shape for its serializer.
pub(crate) fn kind_mismatch(expected: NodeKind, found: NodeKind) -> String {
    alloc::format!("Expected a {expected} node, found a {found} node.")
}

// -----------------------------------------------------------------------------
// NodeRef

/// A typed view of a node, paired with the [`DataNode`] it came from.
///
/// Validation results borrow the original `DataNode`, so serializers
/// receive both and build results through [`valid`](Self::valid) and
/// [`invalid`](Self::invalid).
#[derive(Debug)]
pub struct NodeRef<'a, N: ?Sized> {
    node: &'a N,
    source: &'a DataNode,
}

impl<N: ?Sized> Clone for NodeRef<'_, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: ?Sized> Copy for NodeRef<'_, N> {}

impl<'a, N: NodeType> NodeRef<'a, N> {
    /// Views `source` as `N`, `None` on a kind mismatch.
    #[inline]
    pub fn new(source: &'a DataNode) -> Option<Self> {
        N::from_node(source).map(|node| Self { node, source })
    }

    /// Returns the typed node with the full borrow lifetime.
    #[inline]
    pub fn into_node(self) -> &'a N {
        self.node
    }

    /// Returns the untyped node.
    #[inline]
    pub fn source(self) -> &'a DataNode {
        self.source
    }

    /// Accepts the node.
    #[inline]
    pub fn valid(self) -> ValidationNode<'a> {
        ValidationNode::Valid(self.source)
    }

    /// Rejects the node with `message`.
    #[inline]
    pub fn invalid(self, message: impl Into<String>) -> ValidationNode<'a> {
        ValidationNode::Invalid(ErrorNode::new(self.source, message))
    }
}

impl<N: ?Sized> Deref for NodeRef<'_, N> {
    type Target = N;

    #[inline]
    fn deref(&self) -> &N {
        self.node
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{NodeRef, NodeType, kind_mismatch};
    use crate::node::{DataNode, MappingNode, NodeKind, SequenceNode, ValueNode};

    #[test]
    fn from_node_checks_kind() {
        let value = DataNode::value("x");
        assert!(ValueNode::from_node(&value).is_some());
        assert!(SequenceNode::from_node(&value).is_none());
        assert!(MappingNode::from_node(&value).is_none());
        assert!(DataNode::from_node(&value).is_some());
    }

    #[test]
    fn node_ref_builds_results_on_source() {
        let source = DataNode::value("7");
        let node = NodeRef::<ValueNode>::new(&source).unwrap();
        assert_eq!(node.value(), "7");
        assert!(node.valid().is_valid());

        let invalid = node.invalid("nope");
        assert_eq!(invalid.message(), Some("nope"));
        assert!(core::ptr::eq(invalid.node(), &source));
    }

    #[test]
    fn mismatch_message() {
        assert_eq!(
            kind_mismatch(NodeKind::Mapping, NodeKind::Value),
            "Expected a mapping node, found a value node."
        );
    }
}
