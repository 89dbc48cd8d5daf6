//! Built-in serializers.
//!
//! [`SerializationManagerBuilder::new`](crate::SerializationManagerBuilder::new)
//! registers the scalar ones. Generic containers are registered per
//! instantiation.

mod mapping;
mod node;
mod option;
mod primitive;
mod sequence;
mod type_handle;

pub use mapping::MappingSerializer;
pub use node::NodeSerializer;
pub use option::OptionSerializer;
pub use primitive::PrimitiveSerializer;
pub use sequence::SequenceSerializer;
pub use type_handle::TypeHandleSerializer;
