use core::any::Any;

// -----------------------------------------------------------------------------
// SerializationContext

/// Per-operation state passed through every serializer call.
///
/// The engine never inspects it, it only forwards it to nested calls.
/// Serializers that expect a particular context downcast it.
///
/// ```
/// use strata_serial::SerializationContext;
///
/// #[derive(Default)]
/// struct Depth(usize);
/// impl SerializationContext for Depth {}
///
/// struct Locale;
/// impl SerializationContext for Locale {}
///
/// let mut depth = Depth::default();
/// let ctx: &mut dyn SerializationContext = &mut depth;
///
/// ctx.downcast_mut::<Depth>().unwrap().0 += 1;
/// assert_eq!(ctx.downcast_ref::<Depth>().unwrap().0, 1);
/// assert!(ctx.is::<Depth>());
/// assert!(!ctx.is::<Locale>());
/// ```
pub trait SerializationContext: Any + Send + 'static {}

impl dyn SerializationContext {
    /// Whether the context is a `T`.
    #[inline]
    pub fn is<T: SerializationContext>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: SerializationContext>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: SerializationContext>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

impl SerializationContext for () {}
