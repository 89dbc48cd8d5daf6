use alloc::format;
use alloc::string::String;

use strata_reflect::info::Type;

use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef, ValueNode};
use crate::plugin::TypeSerializer;
use crate::validation::ValidationNode;

// -----------------------------------------------------------------------------
// TypeHandleSerializer

/// Serializer for [`Type`] handles written as type names.
///
/// A few common names are accepted without asking the type resolver:
///
/// | name     | type     |
/// |----------|----------|
/// | `bool`   | `bool`   |
/// | `char`   | `char`   |
/// | `str`    | `String` |
/// | `string` | `String` |
/// | `int`    | `i32`    |
/// | `long`   | `i64`    |
/// | `float`  | `f32`    |
/// | `double` | `f64`    |
///
/// Everything else goes through
/// [`Dependencies::types`](crate::Dependencies::types). Handles are always
/// written in their canonical form, so `int` reads back as `i32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeHandleSerializer;

impl TypeHandleSerializer {
    /// Looks `name` up in the shortcut table.
    ///
    /// Node text is trimmed before the lookup, the same way
    /// [`TypeRegistry`](strata_reflect::registry::TypeRegistry) trims names.
    pub fn shortcut(name: &str) -> Option<Type> {
        match name {
            "bool" => Some(Type::of::<bool>()),
            "char" => Some(Type::of::<char>()),
            "str" | "string" => Some(Type::of::<String>()),
            "int" => Some(Type::of::<i32>()),
            "long" => Some(Type::of::<i64>()),
            "float" => Some(Type::of::<f32>()),
            "double" => Some(Type::of::<f64>()),
            _ => None,
        }
    }

    fn resolve(name: &str, deps: &Dependencies<'_>) -> Option<Type> {
        let name = name.trim();
        match Self::shortcut(name) {
            Some(ty) => Some(ty),
            None => deps.types().resolve(name),
        }
    }
}

fn not_found(name: &str) -> String {
    format!("Type '{name}' not found.")
}

impl TypeSerializer<Type> for TypeHandleSerializer {
    type Node = ValueNode;

    fn validate<'a>(&self, node: NodeRef<'a, ValueNode>, deps: &Dependencies<'_>) -> ValidationNode<'a> {
        match Self::resolve(node.value(), deps) {
            Some(_) => node.valid(),
            None => node.invalid(not_found(node.value())),
        }
    }

    fn read(
        &self,
        node: &ValueNode,
        deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Type, SerialError> {
        Self::resolve(node.value(), deps)
            .ok_or_else(|| SerialError::decode(not_found(node.value()), node.clone()))
    }

    #[inline]
    fn write(
        &self,
        value: &Type,
        _always_write: bool,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        Ok(DataNode::value(value.qualified_name()))
    }

    #[inline]
    fn copy(
        &self,
        source: &Type,
        _target: Type,
        _deps: &Dependencies<'_>,
        _ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Type, SerialError> {
        Ok(*source)
    }
}

// -----------------------------------------------------------------------------
// Tests
