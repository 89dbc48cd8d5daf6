use alloc::format;
use alloc::string::{String, ToString};

use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef, ValueNode};
use crate::plugin::TypeSerializer;
use crate::validation::ValidationNode;

// -----------------------------------------------------------------------------
// PrimitiveSerializer

/// Serializer for scalar types, parsed with [`FromStr`](core::str::FromStr)
/// and written with [`ToString`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveSerializer;

fn parse_failure(text: &str, type_name: &str) -> String {
    format!("Failed to parse '{text}' as {type_name}.")
}

macro_rules! impl_primitive_serializer {
    ($($ty:ident),* $(,)?) => {
        $(
            impl TypeSerializer<$ty> for PrimitiveSerializer {
                type Node = ValueNode;

                fn validate<'a>(
                    &self,
                    node: NodeRef<'a, ValueNode>,
                    _deps: &Dependencies<'_>,
                ) -> ValidationNode<'a> {
                    match node.value().parse::<$ty>() {
                        Ok(_) => node.valid(),
                        Err(_) => node.invalid(parse_failure(node.value(), stringify!($ty))),
                    }
                }

                fn read(
                    &self,
                    node: &ValueNode,
                    _deps: &Dependencies<'_>,
                    _ctx: Option<&mut dyn SerializationContext>,
                ) -> Result<$ty, SerialError> {
                    node.value().parse::<$ty>().map_err(|_| {
                        SerialError::decode(parse_failure(node.value(), stringify!($ty)), node.clone())
                    })
                }

                #[inline]
                fn write(
                    &self,
                    value: &$ty,
                    _always_write: bool,
                    _deps: &Dependencies<'_>,
                    _ctx: Option<&mut dyn SerializationContext>,
                ) -> Result<DataNode, SerialError> {
                    Ok(DataNode::value(value.to_string()))
                }

                #[inline]
                fn copy(
                    &self,
                    source: &$ty,
                    _target: $ty,
                    _deps: &Dependencies<'_>,
                    _ctx: Option<&mut dyn SerializationContext>,
                ) -> Result<$ty, SerialError> {
                    Ok(*source)
                }
            }
        )*
    };
}

impl_primitive_serializer!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl TypeSerializer<String> for PrimitiveSerializer {
    type Node = ValueNode;

    #[inline]
    fn validate<'a>(&self, node: NodeRef<'a, ValueNode>, _deps: &Dependencies<'_>) -> ValidationNode<'a> {
        node.valid()
    }

    #[inline]
    fn read(
        &self,
        node: &ValueNode,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<String, SerialError> {
        Ok(String::from(node.value()))
    }

    #[inline]
    fn write(
        &self,
        value: &String,
        _always_write: bool,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        Ok(DataNode::value(value.as_str()))
    }

    fn copy(
        &self,
        source: &String,
        mut target: String,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<String, SerialError> {
        target.clear();
        target.push_str(source);
        Ok(target)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::SerializationManager;
    use crate::SerialError;
    use crate::node::{DataNode, SequenceNode};

    #[test]
    fn numbers_parse_or_report() {
        let manager = SerializationManager::builder().build().unwrap();

        let node = DataNode::value("-12");
        assert!(manager.validate::<i32>(&node).unwrap().is_valid());
        assert_eq!(manager.read::<i32>(&node, None).unwrap(), -12);

        let result = manager.validate::<u8>(&node).unwrap();
        assert_eq!(result.message(), Some("Failed to parse '-12' as u8."));
        assert!(matches!(
            manager.read::<u8>(&node, None),
            Err(SerialError::Decode(_))
        ));
    }

    #[test]
    fn floats_and_bools_write_canonical_text() {
        let manager = SerializationManager::builder().build().unwrap();
        assert_eq!(manager.write(&0.5f32, false, None).unwrap(), DataNode::value("0.5"));
        assert_eq!(manager.write(&true, false, None).unwrap(), DataNode::value("true"));
        assert_eq!(manager.write(&'x', false, None).unwrap(), DataNode::value("x"));
    }

    #[test]
    fn scalar_rejects_sequence() {
        let manager = SerializationManager::builder().build().unwrap();
        let node = DataNode::from(SequenceNode::new());
        let result = manager.validate::<bool>(&node).unwrap();
        assert_eq!(result.message(), Some("Expected a value node, found a sequence node."));

        let err = manager.read::<String>(&node, None).unwrap_err();
        assert!(err.to_string().starts_with("Expected a value node, found a sequence node."));
    }

    #[test]
    fn string_copy_reuses_buffer() {
        let manager = SerializationManager::builder().build().unwrap();
        let target = String::with_capacity(64);
        let copied = manager.copy(&String::from("abc"), target, None).unwrap();
        assert_eq!(copied, "abc");
        assert!(copied.capacity() >= 64);
    }
}
