use alloc::string::String;
use core::fmt;

use crate::node::{MappingNode, SequenceNode, ValueNode};

// -----------------------------------------------------------------------------
// NodeKind

/// The shape of a [`DataNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Value,
    Sequence,
    Mapping,
}

impl NodeKind {
    /// Lowercase name used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Value => "value",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// DataNode

/// One node of the intermediate tree every serializer reads from and writes to.
///
/// ```
/// use strata_serial::node::{DataNode, MappingNode, NodeKind, SequenceNode};
///
/// let mut root = MappingNode::new();
/// root.push("id", "7");
/// root.push("tags", SequenceNode::from_iter([DataNode::value("a"), DataNode::value("b")]));
///
/// let root = DataNode::from(root);
/// assert_eq!(root.kind(), NodeKind::Mapping);
/// assert_eq!(root.to_string(), "{id: 7, tags: [a, b]}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataNode {
    Value(ValueNode),
    Sequence(SequenceNode),
    Mapping(MappingNode),
}

impl DataNode {
    /// Creates an untagged scalar node.
    #[inline]
    pub fn value(value: impl Into<String>) -> Self {
        DataNode::Value(ValueNode::new(value))
    }

    /// Creates the `null` scalar node.
    #[inline]
    pub fn null() -> Self {
        DataNode::Value(ValueNode::null())
    }

    /// Returns the shape of the node.
    #[inline]
    pub const fn kind(&self) -> NodeKind {
        match self {
            DataNode::Value(_) => NodeKind::Value,
            DataNode::Sequence(_) => NodeKind::Sequence,
            DataNode::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Returns the tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            DataNode::Value(node) => node.tag(),
            DataNode::Sequence(node) => node.tag(),
            DataNode::Mapping(node) => node.tag(),
        }
    }

    /// Replaces the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = Some(tag.into());
        match &mut self {
            DataNode::Value(node) => node.set_tag(tag),
            DataNode::Sequence(node) => node.set_tag(tag),
            DataNode::Mapping(node) => node.set_tag(tag),
        }
        self
    }

    /// Whether the node is a `null` scalar.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DataNode::Value(node) if node.is_null())
    }

    #[inline]
    pub fn as_value(&self) -> Option<&ValueNode> {
        match self {
            DataNode::Value(node) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&SequenceNode> {
        match self {
            DataNode::Sequence(node) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn as_mapping(&self) -> Option<&MappingNode> {
        match self {
            DataNode::Mapping(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the payload of a scalar node.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().map(ValueNode::value)
    }

    /// Structural equality that ignores tags.
    pub fn same_content(&self, other: &DataNode) -> bool {
        match (self, other) {
            (DataNode::Value(a), DataNode::Value(b)) => a.value() == b.value(),
            (DataNode::Sequence(a), DataNode::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same_content(y))
            }
            (DataNode::Mapping(a), DataNode::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka.same_content(kb) && va.same_content(vb))
            }
            _ => false,
        }
    }
}

impl From<ValueNode> for DataNode {
    #[inline]
    fn from(node: ValueNode) -> Self {
        DataNode::Value(node)
    }
}

impl From<SequenceNode> for DataNode {
    #[inline]
    fn from(node: SequenceNode) -> Self {
        DataNode::Sequence(node)
    }
}

impl From<MappingNode> for DataNode {
    #[inline]
    fn from(node: MappingNode) -> Self {
        DataNode::Mapping(node)
    }
}

impl From<&str> for DataNode {
    #[inline]
    fn from(value: &str) -> Self {
        DataNode::value(value)
    }
}

impl From<String> for DataNode {
    #[inline]
    fn from(value: String) -> Self {
        DataNode::value(value)
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataNode::Value(node) => fmt::Display::fmt(node, f),
            DataNode::Sequence(node) => fmt::Display::fmt(node, f),
            DataNode::Mapping(node) => fmt::Display::fmt(node, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DataNode, NodeKind};
    use crate::node::{MappingNode, SequenceNode, ValueNode};

    #[test]
    fn kinds_and_accessors() {
        let value = DataNode::value("1");
        assert_eq!(value.kind(), NodeKind::Value);
        assert_eq!(value.as_str(), Some("1"));
        assert!(value.as_sequence().is_none());

        let seq = DataNode::from(SequenceNode::new());
        assert_eq!(seq.kind(), NodeKind::Sequence);
        assert!(seq.as_str().is_none());

        assert!(DataNode::null().is_null());
        assert!(DataNode::value("~").is_null());
        assert!(!DataNode::value("nil").is_null());
    }

    #[test]
    fn tags_are_kept_but_ignored_by_same_content() {
        let a = DataNode::value("x").with_tag("!type:String");
        let b = DataNode::value("x");
        assert_eq!(a.tag(), Some("!type:String"));
        assert_ne!(a, b);
        assert!(a.same_content(&b));
    }

    #[test]
    fn display_quotes_awkward_scalars() {
        let mut map = MappingNode::new();
        map.push("text", "a, b");
        map.push("empty", "");
        assert_eq!(DataNode::from(map).to_string(), r#"{text: "a, b", empty: ""}"#);

        let tagged = DataNode::from(ValueNode::new("1").with_tag("!n"));
        assert_eq!(tagged.to_string(), "!n 1");
    }
}
