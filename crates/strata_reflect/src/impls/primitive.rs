use alloc::string::String;

use crate::impl_type_path;
use crate::info::TypePath;

impl_type_path!(bool);
impl_type_path!(char);
impl_type_path!(f32);
impl_type_path!(f64);

impl_type_path!(i8);
impl_type_path!(i16);
impl_type_path!(i32);
impl_type_path!(i64);
impl_type_path!(i128);
impl_type_path!(isize);

impl_type_path!(u8);
impl_type_path!(u16);
impl_type_path!(u32);
impl_type_path!(u64);
impl_type_path!(u128);
impl_type_path!(usize);

impl_type_path!((in "alloc::string") String);

impl TypePath for () {
    #[inline(always)]
    fn type_path() -> &'static str {
        "()"
    }

    #[inline(always)]
    fn type_name() -> &'static str {
        "()"
    }

    #[inline(always)]
    fn type_ident() -> &'static str {
        "()"
    }
}

impl TypePath for &'static str {
    #[inline(always)]
    fn type_path() -> &'static str {
        "&str"
    }

    #[inline(always)]
    fn type_name() -> &'static str {
        "&str"
    }

    #[inline(always)]
    fn type_ident() -> &'static str {
        "&str"
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::info::TypePath;

    #[test]
    fn primitives_have_no_module() {
        assert_eq!(bool::type_path(), "bool");
        assert_eq!(u128::module_path(), None);
        assert_eq!(<()>::type_name(), "()");
    }

    #[test]
    fn string_is_qualified() {
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_ident(), "String");
        assert_eq!(String::module_path(), Some("alloc::string"));
    }
}
