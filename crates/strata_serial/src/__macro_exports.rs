//! Items referenced by exported macros. Not public API.

crate::cfg::auto_register! {
    pub mod auto_register {
        pub use inventory;

        use crate::manager::SerializationManagerBuilder;

        /// A registration callback collected by [`inventory`].
        pub struct AutoSerializerFunc(pub fn(&mut SerializationManagerBuilder));

        inventory::collect!(AutoSerializerFunc);

        fn mark_available(builder: &mut SerializationManagerBuilder) {
            builder.mark_auto_available();
        }

        // Submitted like any user serializer, seeing it run tells whether
        // static registration works here.
        inventory::submit! {
            AutoSerializerFunc(mark_available)
        }

        pub(crate) fn register_serializers(builder: &mut SerializationManagerBuilder) {
            for func in inventory::iter::<AutoSerializerFunc> {
                (func.0)(builder);
            }
        }
    }
}

/// Submits a serializer for
/// [`SerializationManagerBuilder::auto_register`](crate::SerializationManagerBuilder::auto_register).
///
/// The first argument is the serialized type, the second a constant
/// expression building the serializer.
/// Without the `auto_register` feature this expands to nothing.
///
/// ```
/// use strata_serial::node::{DataNode, NodeRef};
/// use strata_serial::validation::ValidationNode;
/// use strata_serial::{Dependencies, SerialError, SerializationContext, TypeSerializer};
///
/// #[derive(Debug, PartialEq)]
/// pub struct Marker;
/// pub struct MarkerSerializer;
///
/// impl TypeSerializer<Marker> for MarkerSerializer {
///     type Node = DataNode;
///
///     fn validate<'a>(&self, node: NodeRef<'a, DataNode>, _: &Dependencies<'_>) -> ValidationNode<'a> {
///         node.valid()
///     }
///
///     fn read(&self, _: &DataNode, _: &Dependencies<'_>, _: Option<&mut dyn SerializationContext>) -> Result<Marker, SerialError> {
///         Ok(Marker)
///     }
///
///     fn write(&self, _: &Marker, _: bool, _: &Dependencies<'_>, _: Option<&mut dyn SerializationContext>) -> Result<DataNode, SerialError> {
///         Ok(DataNode::value("marker"))
///     }
///
///     fn copy(&self, _: &Marker, _: Marker, _: &Dependencies<'_>, _: Option<&mut dyn SerializationContext>) -> Result<Marker, SerialError> {
///         Ok(Marker)
///     }
/// }
///
/// strata_serial::submit_serializer!(Marker, MarkerSerializer);
///
/// let mut builder = strata_serial::SerializationManagerBuilder::new();
/// if builder.auto_register() {
///     let manager = builder.build().unwrap();
///     assert_eq!(manager.read::<Marker>(&DataNode::null(), None).unwrap(), Marker);
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_serializer {
    ($ty:ty, $serializer:expr) => {
        const _: () = {
            fn register(builder: &mut $crate::SerializationManagerBuilder) {
                builder.register::<$ty, _>($serializer);
            }

            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::AutoSerializerFunc(register)
            }
        };
    };
}

/// Submits a serializer for
/// [`SerializationManagerBuilder::auto_register`](crate::SerializationManagerBuilder::auto_register).
///
/// The `auto_register` feature is disabled, this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! submit_serializer {
    ($ty:ty, $serializer:expr) => {};
}
