use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use strata_utils::hash::HashMap;

use crate::impls::{GenericTypePathCell, concat};
use crate::info::TypePath;

macro_rules! impl_generic_type_path {
    ($module:literal, $ident:literal, $ty:ident < $($param:ident),+ >) => {
        impl<$($param: TypePath),+> TypePath for $ty<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let params = [$($param::type_path()),+].join(", ");
                    concat(&[$module, "::", $ident, "<", &params, ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let params = [$($param::type_name()),+].join(", ");
                    concat(&[$ident, "<", &params, ">"])
                })
            }

            #[inline(always)]
            fn type_ident() -> &'static str {
                $ident
            }

            #[inline(always)]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

impl_generic_type_path!("core::option", "Option", Option<T>);
impl_generic_type_path!("alloc::vec", "Vec", Vec<T>);
impl_generic_type_path!("alloc::collections", "BTreeMap", BTreeMap<K, V>);
impl_generic_type_path!("strata_utils::hash", "HashMap", HashMap<K, V>);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use strata_utils::hash::HashMap;

    use crate::info::TypePath;

    #[test]
    fn nested_generics() {
        assert_eq!(
            <Option<Vec<usize>>>::type_path(),
            "core::option::Option<alloc::vec::Vec<usize>>"
        );
        assert_eq!(<Option<Vec<usize>>>::type_name(), "Option<Vec<usize>>");
        assert_eq!(<Option<Vec<usize>>>::type_ident(), "Option");
    }

    #[test]
    fn instantiations_do_not_share_names() {
        assert_eq!(<Vec<u8>>::type_name(), "Vec<u8>");
        assert_eq!(<Vec<i8>>::type_name(), "Vec<i8>");
    }

    #[test]
    fn maps_list_both_params() {
        assert_eq!(
            <BTreeMap<String, i32>>::type_path(),
            "alloc::collections::BTreeMap<alloc::string::String, i32>"
        );
        assert_eq!(<HashMap<String, bool>>::type_name(), "HashMap<String, bool>");
    }
}
