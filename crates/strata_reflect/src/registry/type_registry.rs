use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use strata_utils::TypeIdMap;
use strata_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{Type, TypePath};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A pre-built index of type handles.
///
/// Every registered type can be looked up by its [`TypeId`], its full
/// [type path] or, when unambiguous, its short [type name].
///
/// The registry is filled once at startup and then only read. The
/// serialization engine consumes it through [`TypeResolver`].
///
/// # Example
///
/// ```
/// use strata_reflect::info::Type;
/// use strata_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// let ty = registry.get_with_type_name("String").unwrap();
/// assert_eq!(ty, Type::of::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// ```
///
/// [type path]: crate::info::TypePath::type_path
/// [type name]: crate::info::TypePath::type_name
/// [`TypeResolver`]: crate::registry::TypeResolver
pub struct TypeRegistry {
    types: TypeIdMap<Type>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            types: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Create a type registry with default registrations for primitive types.
    ///
    /// - `()` `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    /// - [`Type`]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<alloc::string::String>();
        registry.register::<Type>();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        ty: Type,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = ty.name();

        // A short name shared by two types resolves to neither.
        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Registers a type handle.
    ///
    /// Returns `false` and does nothing if the [`TypeId`] is already present.
    pub fn insert(&mut self, ty: Type) -> bool {
        self.types.try_insert(ty.id(), || {
            Self::add_new_type_indices(
                ty,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            ty
        })
    }

    /// Registers `T` if it has not been registered already.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use strata_reflect::registry::TypeRegistry;
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<Vec<u8>>();
    ///
    /// assert!(registry.contains(TypeId::of::<Vec<u8>>()));
    /// assert!(registry.get_with_type_path("alloc::vec::Vec<u8>").is_some());
    /// ```
    #[inline]
    pub fn register<T: TypePath>(&mut self) {
        self.insert(Type::of::<T>());
    }

    /// Registers every type submitted with [`impl_auto_register!`](crate::impl_auto_register).
    ///
    /// Repeated calls are cheap and will not insert duplicates.
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
                use crate::__macro_exports::auto_register;
                if self.contains(TypeId::of::<auto_register::AvailFlag>()) {
                    return true;
                }
                auto_register::register_types(self);
                self.contains(TypeId::of::<auto_register::AvailFlag>())
            } else {
                false
            }
        }
    }

    /// Whether the type with given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains(&type_id)
    }

    /// Returns the handle registered for `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Type> {
        self.types.get(&type_id).copied()
    }

    /// Returns the handle with the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<Type> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the handle with the given [type name].
    ///
    /// Returns `None` if the name is ambiguous or unknown.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<Type> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given [type name] matches multiple registered types.
    ///
    /// ```
    /// use strata_reflect::registry::TypeRegistry;
    ///
    /// mod foo {
    ///     pub struct Item;
    ///     strata_reflect::impl_type_path!((in "foo") Item);
    /// }
    /// mod bar {
    ///     pub struct Item;
    ///     strata_reflect::impl_type_path!((in "bar") Item);
    /// }
    ///
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<foo::Item>();
    /// registry.register::<bar::Item>();
    ///
    /// assert!(registry.is_ambiguous("Item"));
    /// assert!(registry.get_with_type_name("Item").is_none());
    /// assert!(registry.get_with_type_path("bar::Item").is_some());
    /// ```
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns an iterator over the registered handles.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Type> + '_ {
        self.types.values().copied()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared [`TypeRegistry`] behind a [`RwLock`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Wraps an existing registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&*self.read(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::{TypeRegistry, TypeRegistryArc};
    use crate::info::Type;

    struct Probe;
    crate::impl_type_path!((in "strata_reflect::tests") Probe);
    crate::impl_auto_register!(Probe);

    #[test]
    fn new_registers_primitives() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<bool>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert_eq!(registry.get_with_type_path("f64"), Some(Type::of::<f64>()));
        assert!(!registry.contains(TypeId::of::<Vec<u8>>()));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.insert(Type::of::<u8>()));
        assert!(!registry.insert(Type::of::<u8>()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookups_by_path_and_name() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Option<i32>>();

        let by_path = registry.get_with_type_path("core::option::Option<i32>");
        let by_name = registry.get_with_type_name("Option<i32>");
        assert_eq!(by_path, Some(Type::of::<Option<i32>>()));
        assert_eq!(by_path, by_name);
        assert_eq!(registry.get_with_type_name("Option"), None);
    }

    #[test]
    fn auto_register_collects_submitted_types() {
        let mut registry = TypeRegistry::empty();
        if registry.auto_register() {
            assert!(registry.contains(TypeId::of::<Probe>()));
            // second scan short-circuits
            let len = registry.len();
            assert!(registry.auto_register());
            assert_eq!(registry.len(), len);
        }
    }

    #[test]
    fn shared_registry() {
        let shared = TypeRegistryArc::new(TypeRegistry::empty());
        shared.write().register::<u16>();
        assert!(shared.read().contains(TypeId::of::<u16>()));
    }
}
