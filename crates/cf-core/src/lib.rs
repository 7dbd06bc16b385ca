//! cf-core: stable foundation for chokeflow.
//!
//! Contains:
//! - units (uom SI types + constructors, field-unit factors)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CfError, CfResult};
pub use numeric::*;
pub use units::*;
