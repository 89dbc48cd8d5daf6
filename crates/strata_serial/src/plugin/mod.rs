//! The serializer plugin contract.

mod erased;

pub(crate) use erased::{DynSerializer, ErasedSerializer, Registration};

use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef, NodeType};
use crate::validation::ValidationNode;

// -----------------------------------------------------------------------------
// TypeSerializer

/// Converts between `T` and one node shape.
///
/// The engine checks that the incoming [`DataNode`] has the shape named by
/// [`Node`](Self::Node) before calling the plugin. A mismatch never reaches
/// the plugin: validation reports `Expected a <kind> node, found a <kind> node.`
/// and reads fail with a [`DecodeError`](crate::DecodeError).
///
/// # Contract
///
/// - [`validate`](Self::validate) is side-effect free and reports every
///   problem it finds through the returned tree.
/// - [`read`](Self::read) may assume `validate` accepted the node. When that
///   does not hold it returns [`SerialError::Decode`] carrying the node.
/// - [`write`](Self::write) produces a fresh node. `always_write` asks
///   composite serializers to keep entries they would otherwise omit.
/// - [`copy`](Self::copy) returns a value equivalent to `source`, reusing
///   the storage of `target` where it can. Containers copy every item through
///   the item serializer, starting from a clone when there is no old item.
/// - [`is_absent`](Self::is_absent) marks values that mappings may leave out.
///
/// # Example
///
/// ```
/// use strata_serial::node::{DataNode, NodeRef, ValueNode};
/// use strata_serial::validation::ValidationNode;
/// use strata_serial::{
///     Dependencies, SerialError, SerializationContext, SerializationManagerBuilder,
///     TypeSerializer,
/// };
///
/// #[derive(Debug, PartialEq)]
/// struct Percent(u8);
///
/// struct PercentSerializer;
///
/// impl TypeSerializer<Percent> for PercentSerializer {
///     type Node = ValueNode;
///
///     fn validate<'a>(&self, node: NodeRef<'a, ValueNode>, _: &Dependencies<'_>) -> ValidationNode<'a> {
///         match node.value().strip_suffix('%').and_then(|v| v.parse::<u8>().ok()) {
///             Some(0..=100) => node.valid(),
///             _ => node.invalid("Expected a percentage."),
///         }
///     }
///
///     fn read(
///         &self,
///         node: &ValueNode,
///         _: &Dependencies<'_>,
///         _: Option<&mut dyn SerializationContext>,
///     ) -> Result<Percent, SerialError> {
///         node.value()
///             .strip_suffix('%')
///             .and_then(|v| v.parse().ok())
///             .map(Percent)
///             .ok_or_else(|| SerialError::decode("Expected a percentage.", node.clone()))
///     }
///
///     fn write(
///         &self,
///         value: &Percent,
///         _: bool,
///         _: &Dependencies<'_>,
///         _: Option<&mut dyn SerializationContext>,
///     ) -> Result<DataNode, SerialError> {
///         Ok(DataNode::value(format!("{}%", value.0)))
///     }
///
///     fn copy(
///         &self,
///         source: &Percent,
///         _: Percent,
///         _: &Dependencies<'_>,
///         _: Option<&mut dyn SerializationContext>,
///     ) -> Result<Percent, SerialError> {
///         Ok(Percent(source.0))
///     }
/// }
///
/// let mut builder = SerializationManagerBuilder::new();
/// builder.register::<Percent, _>(PercentSerializer);
/// let manager = builder.build().unwrap();
///
/// let node = DataNode::value("42%");
/// assert!(manager.validate::<Percent>(&node).unwrap().is_valid());
/// assert_eq!(manager.read::<Percent>(&node, None).unwrap(), Percent(42));
/// assert_eq!(manager.write(&Percent(7), false, None).unwrap(), DataNode::value("7%"));
/// ```
pub trait TypeSerializer<T: Send + 'static>: Send + Sync + 'static {
    /// The node shape this serializer consumes.
    type Node: NodeType;

    /// Checks whether `node` can be read as `T`.
    fn validate<'a>(
        &self,
        node: NodeRef<'a, Self::Node>,
        deps: &Dependencies<'_>,
    ) -> ValidationNode<'a>;

    /// Decodes a node that passed validation.
    fn read(
        &self,
        node: &Self::Node,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError>;

    /// Encodes `value` into a new node.
    fn write(
        &self,
        value: &T,
        always_write: bool,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError>;

    /// Makes `target` equivalent to `source`.
    fn copy(
        &self,
        source: &T,
        target: T,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError>;

    /// Whether `value` stands for a missing entry.
    ///
    /// Composite serializers omit such entries unless `always_write` is set.
    #[inline]
    fn is_absent(&self, value: &T) -> bool {
        let _ = value;
        false
    }
}
