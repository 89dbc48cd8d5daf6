use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef};
use crate::plugin::TypeSerializer;
use crate::validation::ValidationNode;

/// Pass-through serializer keeping a subtree as raw [`DataNode`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeSerializer;

impl TypeSerializer<DataNode> for NodeSerializer {
    type Node = DataNode;

    #[inline]
    fn validate<'a>(&self, node: NodeRef<'a, DataNode>, _deps: &Dependencies<'_>) -> ValidationNode<'a> {
        node.valid()
    }

    #[inline]
    fn read(
        &self,
        node: &DataNode,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        Ok(node.clone())
    }

    #[inline]
    fn write(
        &self,
        value: &DataNode,
        _always_write: bool,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        Ok(value.clone())
    }

    #[inline]
    fn copy(
        &self,
        source: &DataNode,
        _target: DataNode,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        Ok(source.clone())
    }
}
