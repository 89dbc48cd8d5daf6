//! The Type Resolution Service.
//!
//! - [`TypeRegistry`]: a pre-built index from type paths and short names to [`Type`] handles.
//! - [`TypeRegistryArc`]: a shared, lockable registry for administrative mutation.
//! - [`TypeResolver`]: the lookup interface consumed by the serialization engine.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! The `inventory` crate collects every `impl_auto_register!` in the binary.
//! Platforms without support make the scan a no-op that returns `false`.
//!
//! [`Type`]: crate::info::Type

// -----------------------------------------------------------------------------
// Modules

mod resolver;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use resolver::TypeResolver;
pub use type_registry::{TypeRegistry, TypeRegistryArc};
