use alloc::string::String;
use core::fmt;

// -----------------------------------------------------------------------------
// ValueNode

/// A scalar leaf: one textual payload and an optional tag.
///
/// Every scalar is stored as text, the serializer for the target type
/// decides how to parse it.
///
/// ```
/// use strata_serial::node::ValueNode;
///
/// let node = ValueNode::new("42").with_tag("!type:i32");
///
/// assert_eq!(node.value(), "42");
/// assert_eq!(node.tag(), Some("!type:i32"));
/// assert!(!node.is_null());
///
/// let text = ValueNode::new("~").with_tag(ValueNode::LITERAL_TAG);
/// assert!(text.is_null() && text.is_literal());
/// assert!(!text.is_absent());
/// assert!(ValueNode::null().is_absent());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ValueNode {
    value: String,
    tag: Option<String>,
}

impl ValueNode {
    /// The text used for an absent value.
    pub const NULL: &'static str = "null";

    /// Tag marking a null-looking payload as plain text.
    pub const LITERAL_TAG: &'static str = "!str";

    /// Creates an untagged value node.
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: None,
        }
    }

    /// Creates the `null` value node.
    #[inline]
    pub fn null() -> Self {
        Self::new(Self::NULL)
    }

    /// Replaces the tag.
    #[inline]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns the textual payload.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether the payload is `null` or the YAML-style `~`.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.value == Self::NULL || self.value == "~"
    }

    /// Whether the node is carrying the [`LITERAL_TAG`](Self::LITERAL_TAG).
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.tag() == Some(Self::LITERAL_TAG)
    }

    /// Whether the node stands for an absent value: a null payload
    /// without the literal tag.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.is_null() && !self.is_literal()
    }

    /// Consumes the node, returning the payload.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    pub(crate) fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }
}

impl From<&str> for ValueNode {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ValueNode {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag} ")?;
        }
        let plain = !self.value.is_empty()
            && !self.value.contains([',', ':', '[', ']', '{', '}', '"', '\n'])
            && self.value.trim() == self.value;
        if plain {
            f.write_str(&self.value)
        } else {
            write!(f, "{:?}", self.value)
        }
    }
}
