use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::node::DataNode;

// -----------------------------------------------------------------------------
// SequenceNode

/// An ordered list of nodes. Order is significant.
///
/// ```
/// use strata_serial::node::{DataNode, SequenceNode};
///
/// let seq: SequenceNode = ["a", "b"].into_iter().map(DataNode::value).collect();
///
/// assert_eq!(seq.len(), 2);
/// assert_eq!(seq.get(1).and_then(DataNode::as_str), Some("b"));
/// assert_eq!(seq.to_string(), "[a, b]");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SequenceNode {
    items: Vec<DataNode>,
    tag: Option<String>,
}

impl SequenceNode {
    /// Creates an empty sequence.
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            tag: None,
        }
    }

    /// Creates an empty sequence with room for `capacity` items.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            tag: None,
        }
    }

    /// Replaces the tag.
    #[inline]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns the tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Appends an item.
    #[inline]
    pub fn push(&mut self, item: impl Into<DataNode>) {
        self.items.push(item.into());
    }

    /// Returns the item at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&DataNode> {
        self.items.get(index)
    }

    /// Returns all items in order.
    #[inline]
    pub fn items(&self) -> &[DataNode] {
        &self.items
    }

    /// Returns the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the items in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, DataNode> {
        self.items.iter()
    }

    pub(crate) fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }
}

impl FromIterator<DataNode> for SequenceNode {
    fn from_iter<I: IntoIterator<Item = DataNode>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            tag: None,
        }
    }
}

impl From<Vec<DataNode>> for SequenceNode {
    #[inline]
    fn from(items: Vec<DataNode>) -> Self {
        Self { items, tag: None }
    }
}

impl IntoIterator for SequenceNode {
    type Item = DataNode;
    type IntoIter = alloc::vec::IntoIter<DataNode>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a SequenceNode {
    type Item = &'a DataNode;
    type IntoIter = core::slice::Iter<'a, DataNode>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for SequenceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag} ")?;
        }
        f.write_str("[")?;
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        f.write_str("]")
    }
}
