#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use strata_cfg as cfg;
pub use strata_reflect as reflect;
pub use strata_serial as serial;
pub use strata_utils as utils;
