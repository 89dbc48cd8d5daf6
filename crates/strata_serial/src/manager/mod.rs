//! The serializer registry and its entry points.

mod builder;

pub use builder::SerializationManagerBuilder;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use strata_reflect::info::{Type, TypePath};
use strata_reflect::registry::TypeResolver;
use strata_utils::TypeIdMap;

use crate::context::SerializationContext;
use crate::deps::{Dependencies, Services};
use crate::error::SerialError;
use crate::node::DataNode;
use crate::plugin::{DynSerializer, ErasedSerializer, Registration};
use crate::validation::ValidationNode;

/// Prefix of tags that name the type of a node.
pub const TYPE_TAG_PREFIX: &str = "!type:";

// -----------------------------------------------------------------------------
// SerializationManager

/// The serializer registry.
///
/// Built once by a [`SerializationManagerBuilder`] and read-only afterwards,
/// so it can be shared across threads behind an `Arc`.
///
/// Lookups are exact: a serializer for `T` is never used for another type.
///
/// # Example
///
/// ```
/// use strata_reflect::info::Type;
/// use strata_serial::node::DataNode;
/// use strata_serial::SerializationManager;
///
/// let manager = SerializationManager::builder().build().unwrap();
///
/// let node = DataNode::value("int");
/// assert!(manager.validate::<Type>(&node).unwrap().is_valid());
///
/// let ty = manager.read::<Type>(&node, None).unwrap();
/// assert_eq!(ty, Type::of::<i32>());
/// assert_eq!(manager.write(&ty, false, None).unwrap(), DataNode::value("i32"));
/// ```
pub struct SerializationManager {
    serializers: TypeIdMap<Registration>,
    resolver: Arc<dyn TypeResolver>,
    services: Services,
}

impl SerializationManager {
    /// Shorthand for [`SerializationManagerBuilder::new`].
    #[inline]
    pub fn builder() -> SerializationManagerBuilder {
        SerializationManagerBuilder::new()
    }

    #[inline]
    pub(crate) fn resolver(&self) -> &dyn TypeResolver {
        &*self.resolver
    }

    #[inline]
    pub(crate) fn services(&self) -> &Services {
        &self.services
    }

    #[inline]
    fn deps(&self) -> Dependencies<'_> {
        Dependencies::new(self)
    }

    fn serializer<T: Send + 'static>(&self) -> Result<&dyn DynSerializer<T>, SerialError> {
        self.serializers
            .get_type::<T>()
            .and_then(Registration::typed::<T>)
            .ok_or_else(SerialError::unregistered::<T>)
    }

    fn registration(&self, type_id: TypeId) -> Option<&Registration> {
        self.serializers.get(&type_id)
    }

    fn erased(&self, ty: Type) -> Result<&dyn ErasedSerializer, SerialError> {
        match self.registration(ty.id()) {
            Some(registration) => Ok(&*registration.erased),
            None => Err(SerialError::Unregistered {
                type_name: ty.path(),
            }),
        }
    }

    /// Whether a serializer for `T` is registered.
    #[inline]
    pub fn has_serializer<T: 'static>(&self) -> bool {
        self.serializers.contains_type::<T>()
    }

    /// Whether a serializer for the type behind `ty` is registered.
    #[inline]
    pub fn has_serializer_dyn(&self, ty: Type) -> bool {
        self.serializers.contains(&ty.id())
    }

    /// Returns the number of registered serializers.
    #[inline]
    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    // -------------------------------------------------------------------------
    // Typed operations

    /// Checks whether `node` can be read as `T`.
    ///
    /// Fails only if no serializer is registered for `T`.
    pub fn validate<'a, T: Send + 'static>(
        &self,
        node: &'a DataNode,
    ) -> Result<ValidationNode<'a>, SerialError> {
        let serializer = self.serializer::<T>()?;
        crate::cfg::debug! {
            log::trace!("validate `{}`", core::any::type_name::<T>());
        }
        Ok(serializer.validate(node, &self.deps()))
    }

    /// Like [`validate`](Self::validate), reporting a missing serializer
    /// as an invalid node.
    ///
    /// Composite serializers use this for their children.
    pub fn validate_nested<'a, T: Send + 'static>(&self, node: &'a DataNode) -> ValidationNode<'a> {
        match self.validate::<T>(node) {
            Ok(result) => result,
            Err(err) => ValidationNode::invalid(node, format!("{err}.")),
        }
    }

    /// Decodes `node` as `T`.
    ///
    /// The node is expected to have passed [`validate`](Self::validate),
    /// see [`read_validated`](Self::read_validated) otherwise.
    pub fn read<T: Send + 'static>(
        &self,
        node: &DataNode,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError> {
        let serializer = self.serializer::<T>()?;
        crate::cfg::debug! {
            log::trace!("read `{}`", core::any::type_name::<T>());
        }
        serializer.read(node, &self.deps(), ctx)
    }

    /// Validates `node`, then reads it.
    ///
    /// An invalid node yields [`SerialError::Validation`] with every error
    /// found.
    pub fn read_validated<T: Send + 'static>(
        &self,
        node: &DataNode,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError> {
        let result = self.validate::<T>(node)?;
        if !result.is_valid() {
            return Err(SerialError::Validation(result.report()));
        }
        self.read::<T>(node, ctx).inspect_err(|err| {
            log::error!(
                "reading `{}` failed after validation passed: {err}",
                core::any::type_name::<T>()
            );
        })
    }

    /// Encodes `value`.
    pub fn write<T: Send + 'static>(
        &self,
        value: &T,
        always_write: bool,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        let serializer = self.serializer::<T>()?;
        crate::cfg::debug! {
            log::trace!("write `{}`", core::any::type_name::<T>());
        }
        serializer.write(value, always_write, &self.deps(), ctx)
    }

    /// Encodes `value` and tags the node with its type.
    ///
    /// The result can be decoded by [`read_tagged`](Self::read_tagged).
    pub fn write_tagged<T: TypePath + Send>(
        &self,
        value: &T,
        always_write: bool,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        let node = self.write(value, always_write, ctx)?;
        let ty = Type::of::<T>();
        Ok(node.with_tag(format!("{TYPE_TAG_PREFIX}{}", ty.qualified_name())))
    }

    /// Makes `target` equivalent to `source`.
    pub fn copy<T: Send + 'static>(
        &self,
        source: &T,
        target: T,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError> {
        let serializer = self.serializer::<T>()?;
        crate::cfg::debug! {
            log::trace!("copy `{}`", core::any::type_name::<T>());
        }
        serializer.copy(source, target, &self.deps(), ctx)
    }

    /// Whether the serializer of `T` considers `value` a missing entry.
    pub fn is_absent<T: Send + 'static>(&self, value: &T) -> Result<bool, SerialError> {
        Ok(self.serializer::<T>()?.is_absent(value))
    }

    /// Copies `source` into a fresh `T::default()`.
    #[inline]
    pub fn create_copy<T: Default + Send + 'static>(
        &self,
        source: &T,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<T, SerialError> {
        self.copy(source, T::default(), ctx)
    }

    // -------------------------------------------------------------------------
    // Dynamic operations

    /// Checks whether `node` can be read as the type behind `ty`.
    pub fn validate_dyn<'a>(
        &self,
        ty: Type,
        node: &'a DataNode,
    ) -> Result<ValidationNode<'a>, SerialError> {
        let serializer = self.erased(ty)?;
        Ok(serializer.validate(node, &self.deps()))
    }

    /// Decodes `node` as the type behind `ty`.
    pub fn read_dyn(
        &self,
        ty: Type,
        node: &DataNode,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError> {
        let serializer = self.erased(ty)?;
        crate::cfg::debug! {
            log::trace!("read `{}` (dyn)", ty.path());
        }
        serializer.read(node, &self.deps(), ctx)
    }

    /// Encodes a value of any registered type.
    ///
    /// The serializer is picked from the concrete type of `value`. Pass
    /// `&*boxed` rather than `&boxed` for a `Box<dyn Any>`.
    pub fn write_dyn(
        &self,
        value: &dyn Any,
        always_write: bool,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        let Some(registration) = self.registration(value.type_id()) else {
            return Err(SerialError::Unregistered {
                type_name: "dyn Any",
            });
        };
        registration
            .erased
            .write(value, always_write, &self.deps(), ctx)
    }

    /// Copies `source` into `target`, both of the same registered type.
    pub fn copy_dyn(
        &self,
        source: &dyn Any,
        target: Box<dyn Any + Send>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError> {
        let Some(registration) = self.registration(source.type_id()) else {
            return Err(SerialError::Unregistered {
                type_name: "dyn Any",
            });
        };
        let target_id = (*target).type_id();
        if target_id != source.type_id() {
            return Err(SerialError::MismatchedType {
                expected: registration.type_name,
                found: self
                    .registration(target_id)
                    .map_or("dyn Any", |r| r.type_name),
            });
        }
        registration.erased.copy(source, target, &self.deps(), ctx)
    }

    // -------------------------------------------------------------------------
    // Tagged operations

    /// Resolves the `!type:<name>` tag of `node`.
    ///
    /// Names go through the [`Type`] serializer, so shortcuts such as
    /// `int` are accepted.
    pub fn tagged_type(&self, node: &DataNode) -> Result<Type, SerialError> {
        let tag = node.tag().unwrap_or_default();
        let unknown = || SerialError::UnknownTag {
            tag: String::from(tag),
        };
        let name = tag.strip_prefix(TYPE_TAG_PREFIX).ok_or_else(unknown)?;
        let name = DataNode::value(name);
        match self.validate::<Type>(&name)? {
            ValidationNode::Valid(_) => self.read::<Type>(&name, None),
            ValidationNode::Invalid(_) => Err(unknown()),
        }
    }

    /// Checks `node` against the type named by its tag.
    pub fn validate_tagged<'a>(&self, node: &'a DataNode) -> Result<ValidationNode<'a>, SerialError> {
        let ty = self.tagged_type(node)?;
        self.validate_dyn(ty, node)
    }

    /// Decodes `node` as the type named by its tag.
    ///
    /// ```
    /// use strata_serial::node::DataNode;
    /// use strata_serial::SerializationManager;
    ///
    /// let manager = SerializationManager::builder().build().unwrap();
    ///
    /// let node = DataNode::value("12").with_tag("!type:long");
    /// let value = manager.read_tagged(&node, None).unwrap();
    /// assert_eq!(value.downcast_ref::<i64>(), Some(&12));
    /// ```
    pub fn read_tagged(
        &self,
        node: &DataNode,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Box<dyn Any + Send>, SerialError> {
        let ty = self.tagged_type(node)?;
        self.read_dyn(ty, node, ctx)
    }
}

impl fmt::Debug for SerializationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: alloc::vec::Vec<_> =
            self.serializers.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        f.debug_struct("SerializationManager")
            .field("serializers", &names)
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests;
