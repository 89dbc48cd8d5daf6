use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// A stable alternative to [`core::any::type_name`], used to resolve
/// documents that name a type by text.
///
/// - [`type_path`]: the unique identifier of the type, cannot be duplicated.
/// - [`type_name`]: type name without module path, may be duplicated.
/// - [`type_ident`]: the shortest name, without module path and generics.
/// - [`module_path`]: optional module path, `None` for primitives.
///
/// These names never start with `::`.
///
/// # Implementation
///
/// Use [`impl_type_path!`](crate::impl_type_path) for non-generic types:
///
/// ```
/// mod shapes {
///     pub struct Circle;
///     strata_reflect::impl_type_path!((in "my_game::shapes") Circle);
/// }
///
/// use strata_reflect::info::TypePath;
///
/// assert_eq!(shapes::Circle::type_path(), "my_game::shapes::Circle");
/// assert_eq!(shapes::Circle::type_name(), "Circle");
/// ```
///
/// Generic types implement it by hand with a
/// [`GenericTypePathCell`](crate::impls::GenericTypePathCell).
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`type_ident`]: TypePath::type_ident
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path with generics.
    ///
    /// For `Option<Vec<usize>>`, this is `"core::option::Option<alloc::vec::Vec<usize>>"`.
    fn type_path() -> &'static str;

    /// Returns the short path, generics included.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option<Vec<usize>>"`.
    fn type_name() -> &'static str;

    /// Returns the short name without generics.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option"`.
    fn type_ident() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// For `Option<Vec<usize>>`, this is `Some("core::option")`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Object-safe access to [`TypePath`], auto implemented.
///
/// ```
/// use strata_reflect::info::DynamicTypePath;
///
/// let x = String::new();
/// assert_eq!(x.reflect_type_path(), "alloc::string::String");
/// ```
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;

    /// See [`TypePath::type_ident`].
    fn reflect_type_ident(&self) -> &'static str;

    /// See [`TypePath::module_path`].
    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_type_ident(&self) -> &'static str {
        Self::type_ident()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Function-pointer table over a type's [`TypePath`] implementation.
///
/// Names of generic types are built lazily, so the table stores
/// the accessors instead of the strings.
///
/// ```
/// use strata_reflect::info::TypePathTable;
///
/// let x = TypePathTable::of::<String>();
/// assert_eq!(x.path(), "alloc::string::String");
/// assert_eq!(x.name(), "String");
/// assert_eq!(x.module_path(), Some("alloc::string"));
/// assert_eq!(x.crate_name(), Some("alloc"));
/// ```
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    /// Creates a new table from a type.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    /// See [`TypePath::type_path`]
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`]
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::type_ident`]
    #[inline(always)]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    /// See [`TypePath::module_path`]
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }

    /// First segment of the module path.
    pub fn crate_name(&self) -> Option<&'static str> {
        let s = (self.module_path)()?;
        match s.find("::") {
            Some(index) => Some(&s[..index]),
            None => Some(s),
        }
    }
}

impl fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePathTable")
            .field("type_path", &self.path())
            .field("type_name", &self.name())
            .field("type_ident", &self.ident())
            .field("module_path", &self.module_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Type

/// A runtime type handle: a [`TypeId`] plus its [`TypePathTable`].
///
/// Handles are plain `Copy` identifiers. Two handles are equal exactly
/// when their `TypeId`s are equal.
///
/// ```
/// use core::any::TypeId;
/// use strata_reflect::info::Type;
///
/// let ty = Type::of::<String>();
///
/// assert!(ty.is::<String>());
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.qualified_name(), "alloc::string::String");
/// assert_eq!(Type::of::<bool>().qualified_name(), "bool");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_path_table: TypePathTable,
    type_id: TypeId,
}

impl Type {
    /// Creates a handle for `T`.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path_table: TypePathTable::of::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the handle refers to `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    /// Returns the [`TypePathTable`] of the type.
    #[inline(always)]
    pub const fn path_table(&self) -> TypePathTable {
        self.type_path_table
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.type_path_table.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.type_path_table.name()
    }

    /// See [`TypePath::type_ident`].
    #[inline]
    pub fn ident(&self) -> &'static str {
        self.type_path_table.ident()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.type_path_table.module_path()
    }

    /// See [`TypePathTable::crate_name`].
    #[inline]
    pub fn crate_name(&self) -> Option<&'static str> {
        self.type_path_table.crate_name()
    }

    /// The canonical textual form of this handle.
    ///
    /// The full type path when the type lives in a module,
    /// the bare type name otherwise.
    pub fn qualified_name(&self) -> &'static str {
        match self.module_path() {
            Some(_) => self.path(),
            None => self.name(),
        }
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

crate::impl_type_path!((in "strata_reflect::info") Type);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Type, TypePath};

    #[test]
    fn handle_equality_is_by_id() {
        assert_eq!(Type::of::<String>(), Type::of::<String>());
        assert_ne!(Type::of::<String>(), Type::of::<&'static str>());
    }

    #[test]
    fn handle_names() {
        let ty = Type::of::<Vec<Option<u8>>>();
        assert_eq!(ty.path(), "alloc::vec::Vec<core::option::Option<u8>>");
        assert_eq!(ty.name(), "Vec<Option<u8>>");
        assert_eq!(ty.ident(), "Vec");
        assert_eq!(ty.crate_name(), Some("alloc"));
    }

    #[test]
    fn type_is_self_describing() {
        assert_eq!(Type::type_path(), "strata_reflect::info::Type");
        assert_eq!(Type::of::<Type>().qualified_name(), "strata_reflect::info::Type");
        assert_eq!(Type::of::<f64>().qualified_name(), "f64");
    }
}
