//! Bundle output: the aggregation driver and the block writer

pub mod aggregator;
pub mod writer;

// Re-export commonly used items
pub use aggregator::{bundle, Aggregator, BundleProgress};
pub use writer::BundleWriter;
