use alloc::vec::Vec;

use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef, SequenceNode};
use crate::plugin::TypeSerializer;
use crate::validation::{NodeLocation, ValidationNode};

// -----------------------------------------------------------------------------
// SequenceSerializer

/// Serializer for `Vec<T>`, delegating items to the serializer of `T`.
///
/// Copying reuses the items of the target in order. Extra source items
/// are copied by the item serializer onto a clone of themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequenceSerializer;

impl<T: Clone + Send + 'static> TypeSerializer<Vec<T>> for SequenceSerializer {
    type Node = SequenceNode;

    fn validate<'a>(&self, node: NodeRef<'a, SequenceNode>, deps: &Dependencies<'_>) -> ValidationNode<'a> {
        let manager = deps.manager();
        let children = node
            .into_node()
            .iter()
            .enumerate()
            .map(|(index, item)| (NodeLocation::Index(index), manager.validate_nested::<T>(item)))
            .collect();
        ValidationNode::composite(node.source(), "Invalid sequence.", children)
    }

    fn read(
        &self,
        node: &SequenceNode,
        deps: &Dependencies<'_>,
        mut ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Vec<T>, SerialError> {
        let manager = deps.manager();
        let mut items = Vec::with_capacity(node.len());
        for item in node {
            items.push(manager.read::<T>(item, ctx.as_deref_mut())?);
        }
        Ok(items)
    }

    fn write(
        &self,
        value: &Vec<T>,
        always_write: bool,
        deps: &Dependencies<'_>,
        mut ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        let manager = deps.manager();
        let mut node = SequenceNode::with_capacity(value.len());
        for item in value {
            node.push(manager.write(item, always_write, ctx.as_deref_mut())?);
        }
        Ok(DataNode::Sequence(node))
    }

    fn copy(
        &self,
        source: &Vec<T>,
        target: Vec<T>,
        deps: &Dependencies<'_>,
        mut ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Vec<T>, SerialError> {
        let manager = deps.manager();
        let mut reused = target.into_iter();
        let mut items = Vec::with_capacity(source.len());
        for item in source {
            let target = reused.next().unwrap_or_else(|| item.clone());
            let copied = manager.copy(item, target, ctx.as_deref_mut())?;
            items.push(copied);
        }
        Ok(items)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::node::{DataNode, MappingNode, SequenceNode};
    use crate::{SerialError, SerializationContext, SerializationManager};

    fn numbers(items: &[&str]) -> DataNode {
        items.iter().map(|s| DataNode::value(*s)).collect::<SequenceNode>().into()
    }

    #[test]
    fn every_bad_item_is_reported() {
        let manager = SerializationManager::builder().build().unwrap();
        let node = numbers(&["1", "x", "3", "-4"]);

        let result = manager.validate::<Vec<u8>>(&node).unwrap();
        assert_eq!(result.message(), Some("Invalid sequence."));
        let errors = result.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "[1]");
        assert_eq!(errors[0].message, "Failed to parse 'x' as u8.");
        assert_eq!(errors[1].path, "[3]");
    }

    #[test]
    fn read_validated_collects_report() {
        let manager = SerializationManager::builder().build().unwrap();
        let node = numbers(&["a", "b"]);
        match manager.read_validated::<Vec<i32>>(&node, None) {
            Err(SerialError::Validation(report)) => assert_eq!(report.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }

        let node = numbers(&["5", "6"]);
        assert_eq!(manager.read_validated::<Vec<i32>>(&node, None).unwrap(), vec![5, 6]);
    }

    #[test]
    fn write_then_read() {
        let manager = SerializationManager::builder().build().unwrap();
        let value = vec![String::from("a"), String::from("b c")];
        let node = manager.write(&value, false, None).unwrap();
        assert_eq!(node.to_string(), "[a, b c]");
        assert_eq!(manager.read::<Vec<String>>(&node, None).unwrap(), value);
    }

    #[test]
    fn mapping_is_not_a_sequence() {
        let manager = SerializationManager::builder().build().unwrap();
        let node = DataNode::from(MappingNode::new());
        let result = manager.validate::<Vec<bool>>(&node).unwrap();
        assert_eq!(result.message(), Some("Expected a sequence node, found a mapping node."));
    }

    #[test]
    fn nested_vec_needs_registration() {
        let mut builder = SerializationManager::builder();
        builder.register_vec::<Vec<u8>>();
        let manager = builder.build().unwrap();

        let node: DataNode = serde_json::from_str("[[1, 2], [3]]").unwrap();
        let value = manager.read_validated::<Vec<Vec<u8>>>(&node, None).unwrap();
        assert_eq!(value, vec![vec![1, 2], vec![3]]);

        let deeper = manager.validate::<Vec<Vec<Vec<u8>>>>(&node);
        assert!(matches!(deeper, Err(SerialError::Unregistered { .. })));
    }

    #[test]
    fn copy_reuses_items() {
        let manager = SerializationManager::builder().build().unwrap();
        let source = vec![String::from("x"), String::from("y"), String::from("z")];
        let target = vec![String::with_capacity(32)];

        let copied = manager.copy(&source, target, None).unwrap();
        assert_eq!(copied, source);
        assert!(copied[0].capacity() >= 32);

        let shorter = manager.copy(&vec![1u8], vec![7, 8, 9], None).unwrap();
        assert_eq!(shorter, vec![1]);
    }

    #[derive(Default)]
    struct Reads(usize);
    impl SerializationContext for Reads {}

    #[test]
    fn context_reaches_every_item() {
        use crate::node::{NodeRef, ValueNode};
        use crate::validation::ValidationNode;
        use crate::{Dependencies, TypeSerializer};

        #[derive(Clone, Debug, PartialEq)]
        struct Counted(String);

        struct CountedSerializer;

        impl TypeSerializer<Counted> for CountedSerializer {
            type Node = ValueNode;

            fn validate<'a>(&self, node: NodeRef<'a, ValueNode>, _: &Dependencies<'_>) -> ValidationNode<'a> {
                node.valid()
            }

            fn read(
                &self,
                node: &ValueNode,
                _: &Dependencies<'_>,
                ctx: Option<&mut dyn SerializationContext>,
            ) -> Result<Counted, SerialError> {
                if let Some(reads) = ctx.and_then(|c| c.downcast_mut::<Reads>()) {
                    reads.0 += 1;
                }
                Ok(Counted(String::from(node.value())))
            }

            fn write(
                &self,
                value: &Counted,
                _: bool,
                _: &Dependencies<'_>,
                _: Option<&mut dyn SerializationContext>,
            ) -> Result<DataNode, SerialError> {
                Ok(DataNode::value(value.0.as_str()))
            }

            fn copy(
                &self,
                source: &Counted,
                _: Counted,
                _: &Dependencies<'_>,
                _: Option<&mut dyn SerializationContext>,
            ) -> Result<Counted, SerialError> {
                Ok(source.clone())
            }
        }

        let mut builder = SerializationManager::builder();
        builder
            .register::<Counted, _>(CountedSerializer)
            .register_vec::<Counted>();
        let manager = builder.build().unwrap();

        let mut reads = Reads::default();
        let node = numbers(&["a", "b", "c"]);
        let value: Vec<Counted> = manager.read(&node, Some(&mut reads)).unwrap();
        assert_eq!(value.len(), 3);
        assert_eq!(reads.0, 3);
    }
}
