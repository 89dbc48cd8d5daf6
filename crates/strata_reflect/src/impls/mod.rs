//! [`TypePath`] implementations and the helpers used to write them.
//!
//! - [`impl_type_path!`](crate::impl_type_path): non-generic types.
//! - [`GenericTypePathCell`] and [`concat`]: generic types.
//!
//! ## Implemented Menu
//!
//! - `()` `bool` `char` `f32` `f64`
//! - `i8` `i16` `i32` `i64` `i128` `isize`
//! - `u8` `u16` `u32` `u64` `u128` `usize`
//! - `String` `&'static str`
//! - `Option<T>` `Vec<T>` `BTreeMap<K, V>`
//! - `strata_utils::hash::HashMap<K, V>`
//! - [`Type`](crate::info::Type)
//!
//! [`TypePath`]: crate::info::TypePath

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod generic;
mod primitive;

// -----------------------------------------------------------------------------
// Exports

pub use cell::GenericTypePathCell;

/// Concatenates string slices with a single allocation.
///
/// Used to build the names of generic types.
///
/// ```
/// use strata_reflect::impls;
///
/// let s = impls::concat(&["alloc::vec::Vec", "<", "u8", ">"]);
///
/// assert_eq!(s, "alloc::vec::Vec<u8>");
/// assert_eq!(s.capacity(), 19);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

// -----------------------------------------------------------------------------
// Macro

/// Implements [`TypePath`](crate::info::TypePath) for a non-generic type.
///
/// - `impl_type_path!(Foo)`: no module path, the path is the name.
/// - `impl_type_path!((in "my_crate::module") Foo)`: path `my_crate::module::Foo`.
///
/// ```
/// use strata_reflect::info::TypePath;
///
/// struct Meters(f32);
/// strata_reflect::impl_type_path!((in "units") Meters);
///
/// assert_eq!(Meters::type_path(), "units::Meters");
/// assert_eq!(Meters::module_path(), Some("units"));
/// ```
#[macro_export]
macro_rules! impl_type_path {
    ($ty:ident) => {
        impl $crate::info::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                ::core::stringify!($ty)
            }

            #[inline(always)]
            fn type_name() -> &'static str {
                ::core::stringify!($ty)
            }

            #[inline(always)]
            fn type_ident() -> &'static str {
                ::core::stringify!($ty)
            }
        }
    };
    ((in $module:literal) $ty:ident) => {
        impl $crate::info::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                ::core::concat!($module, "::", ::core::stringify!($ty))
            }

            #[inline(always)]
            fn type_name() -> &'static str {
                ::core::stringify!($ty)
            }

            #[inline(always)]
            fn type_ident() -> &'static str {
                ::core::stringify!($ty)
            }

            #[inline(always)]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some($module)
            }
        }
    };
}
