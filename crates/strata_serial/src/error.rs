use alloc::string::String;

use thiserror::Error;

use crate::node::DataNode;
use crate::validation::ValidationReport;

// -----------------------------------------------------------------------------
// DecodeError

/// A `read` was given a node its serializer cannot decode.
///
/// Reads assume the node passed validation first, so this error marks
/// a broken contract rather than bad user data.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message} (node: {node})")]
pub struct DecodeError {
    pub message: String,
    /// The offending raw node.
    pub node: DataNode,
}

impl DecodeError {
    #[inline]
    pub fn new(message: impl Into<String>, node: impl Into<DataNode>) -> Self {
        Self {
            message: message.into(),
            node: node.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// SerialError

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SerialError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("No serializer registered for `{type_name}`")]
    Unregistered { type_name: &'static str },

    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Node has no resolvable type tag: `{tag}`")]
    UnknownTag { tag: String },

    #[error("Mismatched value type: expected `{expected}`, found `{found}`")]
    MismatchedType {
        expected: &'static str,
        found: &'static str,
    },
}

impl SerialError {
    /// Shorthand for [`SerialError::Decode`].
    #[inline]
    pub fn decode(message: impl Into<String>, node: impl Into<DataNode>) -> Self {
        SerialError::Decode(DecodeError::new(message, node))
    }

    #[inline]
    pub(crate) fn unregistered<T: ?Sized>() -> Self {
        SerialError::Unregistered {
            type_name: core::any::type_name::<T>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{DecodeError, SerialError};
    use crate::node::DataNode;

    #[test]
    fn decode_error_shows_node() {
        let err = SerialError::decode("Type 'X' not found.", DataNode::value("X"));
        assert_eq!(err.to_string(), "Type 'X' not found. (node: X)");
        assert!(matches!(err, SerialError::Decode(DecodeError { ref message, .. }) if message.contains("'X'")));
    }

    #[test]
    fn unregistered_names_type() {
        let err = SerialError::unregistered::<u8>();
        assert_eq!(err.to_string(), "No serializer registered for `u8`");
    }
}
