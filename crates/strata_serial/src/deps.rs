use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use strata_reflect::registry::TypeResolver;
use strata_utils::TypeIdMap;

use crate::manager::SerializationManager;

// -----------------------------------------------------------------------------
// Services

/// Opaque capabilities offered to serializers, keyed by type.
///
/// ```
/// use strata_serial::Services;
///
/// struct Locale(&'static str);
///
/// let mut services = Services::new();
/// services.insert(Locale("en"));
///
/// assert_eq!(services.get::<Locale>().map(|l| l.0), Some("en"));
/// assert!(services.get::<u32>().is_none());
/// ```
#[derive(Default)]
pub struct Services(TypeIdMap<Box<dyn Any + Send + Sync>>);

impl Services {
    #[inline]
    pub const fn new() -> Self {
        Self(TypeIdMap::new())
    }

    /// Adds a service, returning `true` if it replaced one of the same type.
    pub fn insert<S: Any + Send + Sync>(&mut self, service: S) -> bool {
        self.0.insert_type::<S>(Box::new(service)).is_some()
    }

    pub fn get<S: Any + Send + Sync>(&self) -> Option<&S> {
        self.0.get_type::<S>().and_then(|s| (**s).downcast_ref::<S>())
    }

    #[inline]
    pub fn contains<S: Any + Send + Sync>(&self) -> bool {
        self.0.contains_type::<S>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").field("len", &self.0.len()).finish()
    }
}

// -----------------------------------------------------------------------------
// Dependencies

/// Everything a serializer may reach besides its input.
///
/// Handed to every plugin operation in place of a global service locator.
#[derive(Clone, Copy)]
pub struct Dependencies<'a> {
    manager: &'a SerializationManager,
}

impl<'a> Dependencies<'a> {
    #[inline]
    pub(crate) const fn new(manager: &'a SerializationManager) -> Self {
        Self { manager }
    }

    /// The engine, for recursive calls into other serializers.
    #[inline]
    pub fn manager(&self) -> &'a SerializationManager {
        self.manager
    }

    /// The type resolution service.
    #[inline]
    pub fn types(&self) -> &'a dyn TypeResolver {
        self.manager.resolver()
    }

    /// Looks up a service registered with
    /// [`with_service`](crate::SerializationManagerBuilder::with_service).
    #[inline]
    pub fn service<S: Any + Send + Sync>(&self) -> Option<&'a S> {
        self.manager.services().get::<S>()
    }
}

impl fmt::Debug for Dependencies<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}
