#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    strata_cfg::define_alias! {
        #[cfg(feature = "auto_register")] => auto_register,
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
    }
}

// -----------------------------------------------------------------------------
// Extern Self

// Lets macros and doc tests name the crate the same way inside and outside.
extern crate self as strata_serial;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod context;
mod deps;
mod error;
mod manager;
mod plugin;

pub mod node;
pub mod serializers;
pub mod validation;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use context::SerializationContext;
pub use deps::{Dependencies, Services};
pub use error::{DecodeError, SerialError};
pub use manager::{SerializationManager, SerializationManagerBuilder, TYPE_TAG_PREFIX};
pub use plugin::TypeSerializer;

#[doc(hidden)]
pub mod __macro_exports;
