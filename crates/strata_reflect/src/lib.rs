#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    strata_cfg::define_alias! {
        #[cfg(feature = "auto_register")] => auto_register,
    }
}

// -----------------------------------------------------------------------------
// Extern Self

// Lets macros and doc tests name the crate the same way inside and outside.
extern crate self as strata_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod impls;
pub mod info;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;
