//! sc-core: shared foundation for the SimCCT session crates.
//!
//! Contains:
//! - numeric (Real + tolerances + range checks used by validation)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
