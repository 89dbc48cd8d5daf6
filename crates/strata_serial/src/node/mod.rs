//! The intermediate data tree.
//!
//! Documents are decoded into a [`DataNode`] tree by a front end (any serde
//! format, or hand-built), then turned into typed values by serializers.

mod data_node;
mod mapping;
mod node_type;
mod sequence;
mod serde;
mod value;

pub(crate) use node_type::kind_mismatch;

pub use data_node::{DataNode, NodeKind};
pub use mapping::MappingNode;
pub use node_type::{NodeRef, NodeType};
pub use sequence::SequenceNode;
pub use value::ValueNode;
