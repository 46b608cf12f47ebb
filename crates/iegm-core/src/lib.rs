//! IEGM-Core: Foundation types for intracardiac electrogram datasets
//!
//! Segment container, label conventions and descriptive statistics shared by
//! the processing, dataset and explorer crates.

pub mod error;
pub mod labels;
pub mod segment;
pub mod stats;

pub use error::{IegmError, IegmResult};
pub use labels::{Partition, RecordingName, RhythmLabel};
pub use segment::{IegmSegment, DEFAULT_SAMPLING_RATE, DEFAULT_SEGMENT_SIZE};
pub use stats::SummaryStats;
