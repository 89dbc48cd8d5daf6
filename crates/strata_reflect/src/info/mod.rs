//! Type handles and their textual names.
//!
//! - [`TypePath`]: static names of a type.
//! - [`DynamicTypePath`]: object-safe access to [`TypePath`].
//! - [`TypePathTable`]: function table over [`TypePath`].
//! - [`Type`]: the runtime type handle handed out by a [`TypeResolver`].
//!
//! [`TypeResolver`]: crate::registry::TypeResolver

// -----------------------------------------------------------------------------
// Modules

mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
