use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::hash::Hash;

use strata_reflect::info::Type;
use strata_reflect::registry::{TypeRegistry, TypeResolver};
use strata_utils::TypeIdMap;
use strata_utils::hash::HashMap;

use crate::deps::Services;
use crate::error::SerialError;
use crate::manager::SerializationManager;
use crate::node::DataNode;
use crate::plugin::{Registration, TypeSerializer};
use crate::serializers::{
    MappingSerializer, NodeSerializer, OptionSerializer, PrimitiveSerializer, SequenceSerializer,
    TypeHandleSerializer,
};

// -----------------------------------------------------------------------------
// SerializationManagerBuilder

/// Collects serializers and services, then freezes them into a
/// [`SerializationManager`].
///
/// [`new`](Self::new) starts with the built-in serializers:
///
/// - `bool` `char` `String`
/// - `i8 - i128` `isize`
/// - `u8 - u128` `usize`
/// - `f32` `f64`
/// - `Vec<P>` and `Option<P>` for each of the types above
/// - [`Type`] and [`DataNode`]
///
/// Other generic containers are registered per instantiation, see
/// [`register_vec`](Self::register_vec) and friends.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use strata_serial::node::DataNode;
/// use strata_serial::SerializationManagerBuilder;
///
/// let mut builder = SerializationManagerBuilder::new();
/// builder
///     .register_btree_map::<String, u32>()
///     .require::<BTreeMap<String, u32>>();
/// let manager = builder.build().unwrap();
///
/// let node: DataNode = serde_json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
/// let map = manager.read_validated::<BTreeMap<String, u32>>(&node, None).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
pub struct SerializationManagerBuilder {
    serializers: TypeIdMap<Registration>,
    resolver: Option<Arc<dyn TypeResolver>>,
    services: Services,
    required: Vec<(TypeId, &'static str)>,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    auto_scanned: bool,
    #[cfg_attr(not(feature = "auto_register"), allow(dead_code))]
    auto_available: bool,
}

impl Default for SerializationManagerBuilder {
    /// See [`SerializationManagerBuilder::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! register_primitives {
    ($builder:ident: $($ty:ty),* $(,)?) => {
        $(
            $builder.register::<$ty, _>(PrimitiveSerializer);
            $builder.register::<Vec<$ty>, _>(SequenceSerializer);
            $builder.register::<Option<$ty>, _>(OptionSerializer);
        )*
    };
}

impl SerializationManagerBuilder {
    /// Creates a builder without any serializer.
    pub fn empty() -> Self {
        Self {
            serializers: TypeIdMap::new(),
            resolver: None,
            services: Services::new(),
            required: Vec::new(),
            auto_scanned: false,
            auto_available: false,
        }
    }

    /// Creates a builder with the built-in serializers.
    pub fn new() -> Self {
        let mut builder = Self::empty();
        register_primitives!(builder:
            bool, char, alloc::string::String,
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            f32, f64,
        );
        builder.register::<Type, _>(TypeHandleSerializer);
        builder.register::<DataNode, _>(NodeSerializer);
        builder
    }

    /// Registers `serializer` for `T`.
    ///
    /// A serializer registered earlier for `T` is replaced.
    pub fn register<T, S>(&mut self, serializer: S) -> &mut Self
    where
        T: Send + 'static,
        S: TypeSerializer<T>,
    {
        let registration = Registration::new::<T, S>(serializer);
        if let Some(old) = self.serializers.insert_type::<T>(registration) {
            log::warn!("serializer for `{}` replaced", old.type_name);
        }
        self
    }

    /// Registers the serializer for `Vec<T>`.
    ///
    /// `T` needs its own serializer when the manager is used.
    #[inline]
    pub fn register_vec<T: Clone + Send + 'static>(&mut self) -> &mut Self {
        self.register::<Vec<T>, _>(SequenceSerializer)
    }

    /// Registers the serializer for `Option<T>`.
    #[inline]
    pub fn register_option<T: Clone + Send + 'static>(&mut self) -> &mut Self {
        self.register::<Option<T>, _>(OptionSerializer)
    }

    /// Registers the serializer for `BTreeMap<K, V>`.
    #[inline]
    pub fn register_btree_map<K, V>(&mut self) -> &mut Self
    where
        K: Ord + Clone + Send + 'static,
        V: Clone + Send + 'static,
    {
        self.register::<BTreeMap<K, V>, _>(MappingSerializer)
    }

    /// Registers the serializer for [`HashMap<K, V>`].
    #[inline]
    pub fn register_hash_map<K, V>(&mut self) -> &mut Self
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Clone + Send + 'static,
    {
        self.register::<HashMap<K, V>, _>(MappingSerializer)
    }

    /// Registers every serializer submitted with
    /// [`submit_serializer!`](crate::submit_serializer).
    ///
    /// Repeated calls do nothing.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if static registration works on the current platform.
    ///
    /// ## Feature Dependency
    ///
    /// Requires the `auto_register` feature. When disabled, it does nothing and returns `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        crate::cfg::auto_register! {
            if {
                if !self.auto_scanned {
                    self.auto_scanned = true;
                    crate::__macro_exports::auto_register::register_serializers(self);
                }
                self.auto_available
            } else {
                false
            }
        }
    }

    #[cfg(feature = "auto_register")]
    pub(crate) fn mark_auto_available(&mut self) {
        self.auto_available = true;
    }

    /// Uses `resolver` as the type resolution service.
    ///
    /// Without one, a [`TypeRegistry::new`] filled by
    /// [`TypeRegistry::auto_register`] is used.
    pub fn with_resolver(&mut self, resolver: impl TypeResolver + 'static) -> &mut Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Uses a pre-built [`TypeRegistry`] as the type resolution service.
    #[inline]
    pub fn with_type_registry(&mut self, registry: TypeRegistry) -> &mut Self {
        self.with_resolver(registry)
    }

    /// Offers `service` to serializers through
    /// [`Dependencies::service`](crate::Dependencies::service).
    pub fn with_service<S: Any + Send + Sync>(&mut self, service: S) -> &mut Self {
        if self.services.insert(service) {
            log::warn!("service `{}` replaced", core::any::type_name::<S>());
        }
        self
    }

    /// Makes [`build`](Self::build) fail unless `T` has a serializer.
    pub fn require<T: 'static>(&mut self) -> &mut Self {
        self.required
            .push((TypeId::of::<T>(), core::any::type_name::<T>()));
        self
    }

    /// Whether a serializer for `T` is registered so far.
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.serializers.contains_type::<T>()
    }

    /// Freezes the builder.
    ///
    /// # Errors
    ///
    /// [`SerialError::Unregistered`] naming the first type passed to
    /// [`require`](Self::require) that has no serializer.
    pub fn build(self) -> Result<SerializationManager, SerialError> {
        if let Some((_, type_name)) = self
            .required
            .iter()
            .find(|(id, _)| !self.serializers.contains(id))
        {
            return Err(SerialError::Unregistered {
                type_name: *type_name,
            });
        }

        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => {
                let mut registry = TypeRegistry::new();
                registry.auto_register();
                Arc::new(registry) as Arc<dyn TypeResolver>
            }
        };

        log::debug!(
            "serialization manager built with {} serializers and {} services",
            self.serializers.len(),
            self.services.len(),
        );

        Ok(SerializationManager {
            serializers: self.serializers,
            resolver,
            services: self.services,
        })
    }
}

impl core::fmt::Debug for SerializationManagerBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerializationManagerBuilder")
            .field("serializers", &self.serializers.len())
            .field("required", &self.required.len())
            .finish_non_exhaustive()
    }
}
