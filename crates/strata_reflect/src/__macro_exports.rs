//! Items referenced by exported macros. Not public API.

crate::cfg::auto_register! {
    pub mod auto_register {
        pub use inventory;

        use crate::info::TypePath;
        use crate::registry::TypeRegistry;

        /// A registration callback collected by [`inventory`].
        pub struct AutoRegisterFunc(pub fn(&mut TypeRegistry));

        inventory::collect!(AutoRegisterFunc);

        pub fn register_type<T: TypePath>(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }

        // Registered through `inventory` like any user type, its presence
        // after a scan tells whether static registration works here.
        pub(crate) struct AvailFlag;

        crate::impl_type_path!((in "strata_reflect::__macro_exports::auto_register") AvailFlag);

        inventory::submit! {
            AutoRegisterFunc(register_type::<AvailFlag>)
        }

        pub(crate) fn register_types(registry: &mut TypeRegistry) {
            for func in inventory::iter::<AutoRegisterFunc> {
                (func.0)(registry);
            }
        }
    }
}

/// Submits `T` for [`TypeRegistry::auto_register`](crate::registry::TypeRegistry::auto_register).
///
/// Only non-generic or fully instantiated types can be submitted.
/// Without the `auto_register` feature this expands to nothing.
///
/// ```
/// use strata_reflect::registry::TypeRegistry;
///
/// pub struct Health(u32);
/// strata_reflect::impl_type_path!((in "game") Health);
/// strata_reflect::impl_auto_register!(Health);
///
/// let mut registry = TypeRegistry::empty();
/// if registry.auto_register() {
///     assert!(registry.get_with_type_path("game::Health").is_some());
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! impl_auto_register {
    ($ty:ty) => {
        const _: () = {
            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::AutoRegisterFunc(
                    $crate::__macro_exports::auto_register::register_type::<$ty>
                )
            }
        };
    };
}

/// Submits `T` for [`TypeRegistry::auto_register`](crate::registry::TypeRegistry::auto_register).
///
/// The `auto_register` feature is disabled, this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! impl_auto_register {
    ($ty:ty) => {};
}
