use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{PoisonError, RwLock};

use strata_utils::TypeIdMap;

/// Static storage for the names of a generic type.
///
/// A `static CELL` inside a generic function is shared by every
/// instantiation, so the cell keys the leaked names by [`TypeId`].
///
/// ```
/// use strata_reflect::impls::{self, GenericTypePathCell};
/// use strata_reflect::info::TypePath;
///
/// struct Wrapper<T>(T);
///
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["demo::Wrapper<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["Wrapper<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Wrapper" }
///     fn module_path() -> Option<&'static str> { Some("demo") }
/// }
///
/// assert_eq!(<Wrapper<String>>::type_path(), "demo::Wrapper<alloc::string::String>");
/// assert_eq!(<Wrapper<u8>>::type_name(), "Wrapper<u8>");
/// ```
pub struct GenericTypePathCell(RwLock<TypeIdMap<&'static str>>);

impl GenericTypePathCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the name stored for `G`, building it with `f` on first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> String) -> &'static str {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> String) -> &'static str {
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match cached {
            Some(name) => name,
            None => *self
                .0
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .get_or_insert(type_id, || f().leak()),
        }
    }
}
