//! Reporting: descriptive statistics and formatted terminal output.
//!
//! Nothing in here writes files or mutates records.

pub mod format;
pub mod stats;

pub use format::*;
pub use stats::{Describe, GroupStats, describe, group_by, top_by_sharpe};
