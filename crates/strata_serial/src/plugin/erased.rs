use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::marker::PhantomData;

use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, NodeRef, NodeType, kind_mismatch};
use crate::plugin::TypeSerializer;
use crate::validation::ValidationNode;

// -----------------------------------------------------------------------------
// DynSerializer

/// Object-safe form of [`TypeSerializer`] working on untyped nodes.
pub(crate) trait DynSerializer<T>: Send + Sync {
    fn validate<'a>(&self, node: &'a DataNode, deps: &Dependencies<'_>) -> ValidationNode<'a>;

    fn read(
        &self,
        node: &DataNode,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError>;

    fn write(
        &self,
        value: &T,
        always_write: bool,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError>;

    fn copy(
        &self,
        source: &T,
        target: T,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError>;

    fn is_absent(&self, value: &T) -> bool;
}

/// Checks the node kind before handing it to the wrapped serializer.
struct NodeAdapter<S>(S);

impl<S> NodeAdapter<S> {
    fn mismatch<N: NodeType>(node: &DataNode) -> alloc::string::String {
        kind_mismatch(N::KIND.unwrap_or(node.kind()), node.kind())
    }
}

impl<T, S> DynSerializer<T> for NodeAdapter<S>
where
    T: Send + 'static,
    S: TypeSerializer<T>,
{
    fn validate<'a>(&self, node: &'a DataNode, deps: &Dependencies<'_>) -> ValidationNode<'a> {
        match NodeRef::<S::Node>::new(node) {
            Some(typed) => self.0.validate(typed, deps),
            None => ValidationNode::invalid(node, Self::mismatch::<S::Node>(node)),
        }
    }

    fn read(
        &self,
        node: &DataNode,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError> {
        match <S::Node as NodeType>::from_node(node) {
            Some(typed) => self.0.read(typed, deps, ctx),
            None => Err(SerialError::decode(
                Self::mismatch::<S::Node>(node),
                node.clone(),
            )),
        }
    }

    #[inline]
    fn write(
        &self,
        value: &T,
        always_write: bool,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        self.0.write(value, always_write, deps, ctx)
    }

    #[inline]
    fn copy(
        &self,
        source: &T,
        target: T,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError> {
        self.0.copy(source, target, deps, ctx)
    }

    #[inline]
    fn is_absent(&self, value: &T) -> bool {
        self.0.is_absent(value)
    }
}

// -----------------------------------------------------------------------------
// ErasedSerializer

/// Fully type-erased serializer, used by the `*_dyn` manager operations.
pub(crate) trait ErasedSerializer: Send + Sync {
    fn validate<'a>(&self, node: &'a DataNode, deps: &Dependencies<'_>) -> ValidationNode<'a>;

    fn read(
        &self,
        node: &DataNode,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError>;

    fn write(
        &self,
        value: &dyn Any,
        always_write: bool,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError>;

    fn copy(
        &self,
        source: &dyn Any,
        target: Box<dyn Any + Send>,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError>;
}

struct Erased<T> {
    inner: Arc<dyn DynSerializer<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> Erased<T> {
    fn mismatch() -> SerialError {
        SerialError::MismatchedType {
            expected: core::any::type_name::<T>(),
            found: "dyn Any",
        }
    }
}

impl<T: Send + 'static> ErasedSerializer for Erased<T> {
    #[inline]
    fn validate<'a>(&self, node: &'a DataNode, deps: &Dependencies<'_>) -> ValidationNode<'a> {
        self.inner.validate(node, deps)
    }

    fn read(
        &self,
        node: &DataNode,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError> {
        let value = self.inner.read(node, deps, ctx)?;
        Ok(Box::new(value))
    }

    fn write(
        &self,
        value: &dyn Any,
        always_write: bool,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        let value = value.downcast_ref::<T>().ok_or_else(Self::mismatch)?;
        self.inner.write(value, always_write, deps, ctx)
    }

    fn copy(
        &self,
        source: &dyn Any,
        target: Box<dyn Any + Send>,
        deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError> {
        let source = source.downcast_ref::<T>().ok_or_else(Self::mismatch)?;
        let target = target.downcast::<T>().map_err(|_| Self::mismatch())?;
        let value = self.inner.copy(source, *target, deps, ctx)?;
        Ok(Box::new(value))
    }
}

// -----------------------------------------------------------------------------
// Registration

/// One entry of the serializer table.
pub(crate) struct Registration {
    pub type_name: &'static str,
    // Holds an `Arc<dyn DynSerializer<T>>`.
    typed: Box<dyn Any + Send + Sync>,
    pub erased: Box<dyn ErasedSerializer>,
}

impl Registration {
    pub fn new<T, S>(serializer: S) -> Self
    where
        T: Send + 'static,
        S: TypeSerializer<T>,
    {
        let inner: Arc<dyn DynSerializer<T>> = Arc::new(NodeAdapter(serializer));
        Self {
            type_name: core::any::type_name::<T>(),
            typed: Box::new(Arc::clone(&inner)),
            erased: Box::new(Erased {
                inner,
                _marker: PhantomData,
            }),
        }
    }

    /// Returns the typed serializer, `None` if `T` is not the registered type.
    #[inline]
    pub fn typed<T: Send + 'static>(&self) -> Option<&dyn DynSerializer<T>> {
        (*self.typed)
            .downcast_ref::<Arc<dyn DynSerializer<T>>>()
            .map(|inner| &**inner)
    }
}
