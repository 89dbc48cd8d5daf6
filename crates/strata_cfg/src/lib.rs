#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Switch macros

/// Passes its input through unchanged.
///
/// This is the expansion target of an alias whose `cfg` predicate is active.
///
/// - `enabled!()` evaluates to `true`.
/// - `enabled!(if { .. } else { .. })` evaluates to the first block.
/// - `enabled! { items }` emits the items.
///
/// # Examples
///
/// ```
/// assert!(strata_cfg::enabled!());
///
/// let x = strata_cfg::enabled!(if { 1 } else { 2 });
/// assert_eq!(x, 1);
/// ```
#[macro_export]
macro_rules! enabled {
    () => { true };
    (if { $($p:tt)* } else { $($n:tt)* }) => { { $($p)* } };
    ($($p:tt)*) => { $($p)* };
}

/// Drops its input.
///
/// This is the expansion target of an alias whose `cfg` predicate is inactive.
///
/// - `disabled!()` evaluates to `false`.
/// - `disabled!(if { .. } else { .. })` evaluates to the second block.
/// - `disabled! { items }` emits nothing.
///
/// # Examples
///
/// ```
/// assert!(!strata_cfg::disabled!());
///
/// let x = strata_cfg::disabled!(if { 1 } else { 2 });
/// assert_eq!(x, 2);
/// ```
#[macro_export]
macro_rules! disabled {
    () => { false };
    (if { $($p:tt)* } else { $($n:tt)* }) => { { $($n)* } };
    ($($p:tt)*) => {};
}

// -----------------------------------------------------------------------------
// Alias definition

/// Defines one alias macro per `cfg` predicate.
///
/// Each alias is a re-export of either [`enabled!`] or [`disabled!`],
/// chosen by evaluating the predicate in the **calling** crate.
///
/// # Examples
///
/// ```
/// mod cfg {
///     strata_cfg::define_alias! {
///         #[cfg(all())] => always,
///         #[cfg(any())] => never,
///     }
/// }
///
/// assert!(cfg::always!());
/// assert!(!cfg::never!());
///
/// let picked = cfg::never!(if { "yes" } else { "no" });
/// assert_eq!(picked, "no");
/// ```
#[macro_export]
macro_rules! define_alias {
    () => {};
    (
        #[cfg($meta:meta)] => $alias:ident
        $(, $($rest:tt)*)?
    ) => {
        #[cfg($meta)]
        #[doc = concat!("Passes code through: `#[cfg(", stringify!($meta), ")]` is active.")]
        pub use $crate::enabled as $alias;

        #[cfg(not($meta))]
        #[doc = concat!("Drops code: `#[cfg(", stringify!($meta), ")]` is inactive.")]
        pub use $crate::disabled as $alias;

        $( $crate::define_alias! { $($rest)* } )?
    };
}
