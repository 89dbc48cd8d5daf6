use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use strata_utils::hash::{FixedHashState, HashSet};

use crate::node::DataNode;

// -----------------------------------------------------------------------------
// ContentKey

/// Hashes and compares a node by content, tags excluded.
struct ContentKey<'a>(&'a DataNode);

impl ContentKey<'_> {
    fn hash_node<H: Hasher>(node: &DataNode, state: &mut H) {
        match node {
            DataNode::Value(value) => {
                state.write_u8(0);
                value.value().hash(state);
            }
            DataNode::Sequence(seq) => {
                state.write_u8(1);
                state.write_usize(seq.len());
                for item in seq {
                    Self::hash_node(item, state);
                }
            }
            DataNode::Mapping(map) => {
                state.write_u8(2);
                state.write_usize(map.len());
                for (key, value) in map.iter() {
                    Self::hash_node(key, state);
                    Self::hash_node(value, state);
                }
            }
        }
    }
}

impl Hash for ContentKey<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::hash_node(self.0, state);
    }
}

impl PartialEq for ContentKey<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.same_content(other.0)
    }
}

impl Eq for ContentKey<'_> {}

// -----------------------------------------------------------------------------
// MappingNode

/// An ordered list of key/value pairs.
///
/// The raw node keeps duplicate keys as written, detecting them is left to the
/// serializer of the target type (see [`MappingNode::duplicate_keys`]).
///
/// ```
/// use strata_serial::node::{DataNode, MappingNode};
///
/// let mut map = MappingNode::new();
/// map.push("name", "strata");
/// map.push("layers", "3");
///
/// assert_eq!(map.get("layers").and_then(DataNode::as_str), Some("3"));
/// assert_eq!(map.get("missing"), None);
/// assert_eq!(map.to_string(), "{name: strata, layers: 3}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct MappingNode {
    entries: Vec<(DataNode, DataNode)>,
    tag: Option<String>,
}

impl MappingNode {
    /// Creates an empty mapping.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            tag: None,
        }
    }

    /// Creates an empty mapping with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
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

    /// Appends an entry, duplicates included.
    #[inline]
    pub fn push(&mut self, key: impl Into<DataNode>, value: impl Into<DataNode>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the value of the first entry whose key is the scalar `key`.
    pub fn get(&self, key: &str) -> Option<&DataNode> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Whether an entry with the scalar key `key` exists.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns all entries in order.
    #[inline]
    pub fn entries(&self) -> &[(DataNode, DataNode)] {
        &self.entries
    }

    /// Iterates the entries in order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&DataNode, &DataNode)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the indices of entries whose key repeats an earlier key.
    ///
    /// Keys are compared structurally, tags excluded. Runs in linear time.
    ///
    /// ```
    /// use strata_serial::node::MappingNode;
    ///
    /// let mut map = MappingNode::new();
    /// map.push("a", "1");
    /// map.push("b", "2");
    /// map.push("a", "3");
    ///
    /// assert_eq!(map.duplicate_keys(), vec![2]);
    /// ```
    pub fn duplicate_keys(&self) -> Vec<usize> {
        let mut seen = HashSet::with_capacity_and_hasher(self.entries.len(), FixedHashState);
        let mut duplicates = Vec::new();
        for (index, (key, _)) in self.entries.iter().enumerate() {
            if !seen.insert(ContentKey(key)) {
                duplicates.push(index);
            }
        }
        duplicates
    }

    pub(crate) fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }
}

impl FromIterator<(DataNode, DataNode)> for MappingNode {
    fn from_iter<I: IntoIterator<Item = (DataNode, DataNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            tag: None,
        }
    }
}

impl IntoIterator for MappingNode {
    type Item = (DataNode, DataNode);
    type IntoIter = alloc::vec::IntoIter<(DataNode, DataNode)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for MappingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag} ")?;
        }
        f.write_str("{")?;
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

// -----------------------------------------------------------------------------
// Tests
