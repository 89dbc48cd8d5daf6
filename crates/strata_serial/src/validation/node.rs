use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::node::DataNode;
use crate::validation::{ValidationError, ValidationReport};

// -----------------------------------------------------------------------------
// NodeLocation

/// Where a child result sits inside its parent node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeLocation {
    /// An item of a sequence.
    Index(usize),
    /// The value stored under a mapping key.
    Key(String),
    /// A mapping key itself.
    KeyOf(String),
}

impl NodeLocation {
    fn write_path(&self, path: &mut String) {
        use core::fmt::Write;
        // Writing into a String cannot fail.
        let _ = match self {
            NodeLocation::Index(index) => write!(path, "[{index}]"),
            NodeLocation::Key(key) => write!(path, ".{key}"),
            NodeLocation::KeyOf(key) => write!(path, ".{{{key}}}"),
        };
    }
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLocation::Index(index) => write!(f, "[{index}]"),
            NodeLocation::Key(key) => f.write_str(key),
            NodeLocation::KeyOf(key) => write!(f, "{{{key}}}"),
        }
    }
}

// -----------------------------------------------------------------------------
// ErrorNode

/// A failed check on one node, with the results of nested checks.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorNode<'a> {
    node: &'a DataNode,
    message: String,
    children: Vec<(NodeLocation, ValidationNode<'a>)>,
}

impl<'a> ErrorNode<'a> {
    /// Creates a leaf error.
    #[inline]
    pub fn new(node: &'a DataNode, message: impl Into<String>) -> Self {
        Self {
            node,
            message: message.into(),
            children: Vec::new(),
        }
    }

    /// Attaches nested results.
    #[inline]
    pub fn with_children(mut self, children: Vec<(NodeLocation, ValidationNode<'a>)>) -> Self {
        self.children = children;
        self
    }

    /// The offending node.
    #[inline]
    pub fn node(&self) -> &'a DataNode {
        self.node
    }

    /// The diagnostic text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The nested results, in visiting order.
    #[inline]
    pub fn children(&self) -> &[(NodeLocation, ValidationNode<'a>)] {
        &self.children
    }
}

// -----------------------------------------------------------------------------
// ValidationNode

/// The outcome of checking a [`DataNode`] against a serializer.
///
/// The tree mirrors the data tree: composite serializers attach one
/// child result per inspected item, so a single pass reports every
/// nested failure.
///
/// ```
/// use strata_serial::node::DataNode;
/// use strata_serial::validation::{ErrorNode, NodeLocation, ValidationNode};
///
/// let root = DataNode::value("root");
/// let bad = DataNode::value("x");
/// let good = DataNode::value("1");
///
/// let result = ValidationNode::composite(&root, "Invalid list.", vec![
///     (NodeLocation::Index(0), ValidationNode::Valid(&good)),
///     (NodeLocation::Index(1), ValidationNode::Invalid(ErrorNode::new(&bad, "Not a number."))),
/// ]);
///
/// assert!(!result.is_valid());
/// let errors = result.errors();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].path, "[1]");
/// assert_eq!(errors[0].message, "Not a number.");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationNode<'a> {
    /// The node is acceptable.
    Valid(&'a DataNode),
    /// The node, or something below it, is not.
    Invalid(ErrorNode<'a>),
}

impl<'a> ValidationNode<'a> {
    /// Shorthand for a leaf [`ValidationNode::Invalid`].
    #[inline]
    pub fn invalid(node: &'a DataNode, message: impl Into<String>) -> Self {
        ValidationNode::Invalid(ErrorNode::new(node, message))
    }

    /// Combines child results.
    ///
    /// Returns `Valid(node)` when every child is valid, otherwise an
    /// error carrying `message` and the failing children.
    pub fn composite(
        node: &'a DataNode,
        message: impl Into<String>,
        children: Vec<(NodeLocation, ValidationNode<'a>)>,
    ) -> Self {
        let failed: Vec<_> = children
            .into_iter()
            .filter(|(_, child)| !child.is_valid())
            .collect();
        if failed.is_empty() {
            ValidationNode::Valid(node)
        } else {
            ValidationNode::Invalid(ErrorNode::new(node, message).with_children(failed))
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationNode::Valid(_))
    }

    /// The node this result is about.
    #[inline]
    pub fn node(&self) -> &'a DataNode {
        match self {
            ValidationNode::Valid(node) => *node,
            ValidationNode::Invalid(error) => error.node,
        }
    }

    /// The top-level diagnostic, `None` when valid.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationNode::Valid(_) => None,
            ValidationNode::Invalid(error) => Some(&error.message),
        }
    }

    /// Flattens the tree into one entry per failing leaf.
    ///
    /// A composite error with failing children is represented by
    /// those children. Paths join locations as `a.b[2].{key}`.
    pub fn errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut path = String::new();
        self.collect_errors(&mut path, &mut errors);
        errors
    }

    fn collect_errors(&self, path: &mut String, errors: &mut Vec<ValidationError>) {
        let ValidationNode::Invalid(error) = self else {
            return;
        };

        let before = errors.len();
        for (location, child) in &error.children {
            let len = path.len();
            location.write_path(path);
            child.collect_errors(path, errors);
            path.truncate(len);
        }

        if errors.len() == before {
            let path: &str = path;
            errors.push(ValidationError {
                path: String::from(path.strip_prefix('.').unwrap_or(path)),
                message: error.message.clone(),
            });
        }
    }

    /// Collects [`errors`](Self::errors) into a report.
    #[inline]
    pub fn report(&self) -> ValidationReport {
        ValidationReport::new(self.errors())
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            ValidationNode::Valid(node) => write!(f, "valid: {node}"),
            ValidationNode::Invalid(error) => {
                write!(f, "{} (node: {})", error.message, error.node)?;
                for (location, child) in &error.children {
                    writeln!(f)?;
                    write!(f, "{:indent$}{location}: ", "", indent = (depth + 1) * 2)?;
                    child.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ValidationNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

// -----------------------------------------------------------------------------
// Tests
