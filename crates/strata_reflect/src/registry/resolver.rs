use alloc::sync::Arc;

use crate::info::Type;
use crate::registry::{TypeRegistry, TypeRegistryArc};

// -----------------------------------------------------------------------------
// TypeResolver

/// Turns a textual type identifier into a runtime [`Type`] handle.
///
/// Implementations must be deterministic for a given process and should be
/// a fast in-memory lookup, callers treat [`resolve`](Self::resolve) as a
/// synchronous, bounded call.
///
/// [`TypeRegistry`] resolves a full type path first, then an unambiguous
/// short type name. A leading `::` is ignored.
///
/// ```
/// use strata_reflect::info::Type;
/// use strata_reflect::registry::{TypeRegistry, TypeResolver};
///
/// let registry = TypeRegistry::new();
///
/// assert_eq!(registry.resolve("::alloc::string::String"), Some(Type::of::<String>()));
/// assert_eq!(registry.resolve("u8"), Some(Type::of::<u8>()));
/// assert_eq!(registry.resolve("Unknown"), None);
/// ```
pub trait TypeResolver: Send + Sync {
    /// Returns the handle named by `name`, or `None` if nothing matches.
    fn resolve(&self, name: &str) -> Option<Type>;
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<Type> {
        let name = name.trim();
        let name = name.strip_prefix("::").unwrap_or(name);
        match self.get_with_type_path(name) {
            Some(ty) => Some(ty),
            None => self.get_with_type_name(name),
        }
    }
}

impl TypeResolver for TypeRegistryArc {
    #[inline]
    fn resolve(&self, name: &str) -> Option<Type> {
        self.read().resolve(name)
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for Arc<R> {
    #[inline]
    fn resolve(&self, name: &str) -> Option<Type> {
        (**self).resolve(name)
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    #[inline]
    fn resolve(&self, name: &str) -> Option<Type> {
        (**self).resolve(name)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::TypeResolver;
    use crate::info::Type;
    use crate::registry::{TypeRegistry, TypeRegistryArc};

    #[test]
    fn path_wins_over_name() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.resolve("alloc::string::String"), Some(Type::of::<alloc::string::String>()));
        assert_eq!(registry.resolve(" i64 "), Some(Type::of::<i64>()));
        assert_eq!(registry.resolve("Nonexistent.Type"), None);
    }

    #[test]
    fn resolver_behind_pointers() {
        let shared: Arc<dyn TypeResolver> = Arc::new(TypeRegistry::new());
        assert_eq!(shared.resolve("bool"), Some(Type::of::<bool>()));

        let locked = TypeRegistryArc::default();
        assert_eq!(locked.resolve("char"), Some(Type::of::<char>()));
    }
}
