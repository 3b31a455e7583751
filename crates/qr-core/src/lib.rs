//! qr-core: shared foundation for quadreach.
//!
//! Contains:
//! - numeric (Real + finiteness/positivity checks)
//! - interval (closed box constraints for control channels)
//! - error (shared error types)

pub mod error;
pub mod interval;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use interval::Interval;
pub use numeric::*;
