//! Input/output helpers.
//!
//! - snapshot CSV writes (`snapshot`)
//! - panel assembly from historical snapshots (`panel`)

pub mod panel;
pub mod snapshot;

pub use panel::*;
pub use snapshot::*;
