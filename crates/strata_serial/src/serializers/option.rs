use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef, ValueNode};
use crate::plugin::TypeSerializer;
use crate::validation::ValidationNode;

/// Serializer for `Option<T>`: a `null` scalar is `None`, anything else
/// is handed to the serializer of `T`.
///
/// When `T` itself writes a null-looking scalar (the string `"null"` or
/// `"~"`), the node is tagged [`ValueNode::LITERAL_TAG`] so it reads back
/// as `Some`. Only null scalars without that tag are `None`.
///
/// ```
/// use strata_serial::SerializationManager;
///
/// let manager = SerializationManager::builder().build().unwrap();
///
/// let text = Some(String::from("null"));
/// let node = manager.write(&text, false, None).unwrap();
/// assert_eq!(node.tag(), Some("!str"));
/// assert_eq!(manager.read::<Option<String>>(&node, None).unwrap(), text);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OptionSerializer;

impl OptionSerializer {
    #[inline]
    fn is_none_node(node: &DataNode) -> bool {
        node.as_value().is_some_and(ValueNode::is_absent)
    }
}

impl<T: Clone + Send + 'static> TypeSerializer<Option<T>> for OptionSerializer {
    type Node = DataNode;

    fn validate<'a>(&self, node: NodeRef<'a, DataNode>, deps: &Dependencies<'_>) -> ValidationNode<'a> {
        if Self::is_none_node(node.source()) {
            node.valid()
        } else {
            deps.manager().validate_nested::<T>(node.source())
        }
    }

    fn read(
        &self,
        node: &DataNode,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Option<T>, SerialError> {
        if Self::is_none_node(node) {
            Ok(None)
        } else {
            deps.manager().read::<T>(node, ctx).map(Some)
        }
    }

    fn write(
        &self,
        value: &Option<T>,
        always_write: bool,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        match value {
            Some(value) => match deps.manager().write(value, always_write, ctx)? {
                DataNode::Value(inner) if inner.is_null() && inner.tag().is_none() => {
                    Ok(DataNode::Value(inner.with_tag(ValueNode::LITERAL_TAG)))
                }
                node => Ok(node),
            },
            None => Ok(DataNode::null()),
        }
    }

    fn copy(
        &self,
        source: &Option<T>,
        target: Option<T>,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Option<T>, SerialError> {
        match (source, target) {
            (Some(source), target) => {
                let target = target.unwrap_or_else(|| source.clone());
                deps.manager().copy(source, target, ctx).map(Some)
            }
            (None, _) => Ok(None),
        }
    }

    #[inline]
    fn is_absent(&self, value: &Option<T>) -> bool {
        value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::SerializationManager;
    use crate::node::{DataNode, ValueNode};

    #[test]
    fn null_is_none() {
        let manager = SerializationManager::builder().build().unwrap();

        for text in ["null", "~"] {
            let node = DataNode::value(text);
            assert!(manager.validate::<Option<u32>>(&node).unwrap().is_valid());
            assert_eq!(manager.read::<Option<u32>>(&node, None).unwrap(), None);
        }

        let node = DataNode::value("9");
        assert_eq!(manager.read::<Option<u32>>(&node, None).unwrap(), Some(9));
        assert_eq!(manager.write(&Some(9u32), false, None).unwrap(), node);
        assert!(manager.write(&None::<u32>, false, None).unwrap().is_null());
    }

    #[test]
    fn inner_errors_surface() {
        let manager = SerializationManager::builder().build().unwrap();
        let node = DataNode::value("nine");
        let result = manager.validate::<Option<u32>>(&node).unwrap();
        assert_eq!(result.message(), Some("Failed to parse 'nine' as u32."));
    }

    #[test]
    fn null_text_stays_some() {
        let manager = SerializationManager::builder().build().unwrap();

        for text in ["null", "~"] {
            let value = Some(String::from(text));
            let node = manager.write(&value, false, None).unwrap();
            assert_eq!(node.tag(), Some(ValueNode::LITERAL_TAG));
            assert!(manager.validate::<Option<String>>(&node).unwrap().is_valid());
            assert_eq!(manager.read::<Option<String>>(&node, None).unwrap(), value);
        }

        let plain = manager.write(&Some(String::from("nil")), false, None).unwrap();
        assert_eq!(plain, DataNode::value("nil"));
        let none = manager.write(&None::<String>, false, None).unwrap();
        assert_eq!(manager.read::<Option<String>>(&none, None).unwrap(), None);
    }

    #[test]
    fn null_text_in_map_values() {
        let mut builder = SerializationManager::builder();
        builder.register_btree_map::<u8, Option<String>>();
        let manager = builder.build().unwrap();

        let map = BTreeMap::from([
            (1, Some(String::from("null"))),
            (2, None),
            (3, Some(String::from("~"))),
        ]);
        let node = manager.write(&map, true, None).unwrap();
        let read = manager.read::<BTreeMap<u8, Option<String>>>(&node, None).unwrap();
        assert_eq!(read, map);
    }
}
