//! Validation results.
//!
//! Validation never fails through `Err`: every outcome is a
//! [`ValidationNode`] tree that can be flattened into a
//! [`ValidationReport`].

mod node;
mod report;

pub use node::{ErrorNode, NodeLocation, ValidationNode};
pub use report::{ValidationError, ValidationReport};
