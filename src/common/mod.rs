//! Utilities shared by every detector.
//!
//! Key components:
//! - **Grouping**: order-preserving key → records partitioning
//! - **Statistics**: mean and population standard deviation

pub mod grouping;
pub mod stats;

pub use grouping::{group_by, group_key, Group};
pub use stats::{max, mean, std_dev};
