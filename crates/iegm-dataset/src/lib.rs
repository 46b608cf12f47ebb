//! IEGM-Dataset: Manifest loading, dataset assembly and reporting
//!
//! Turns the train/test index CSVs and the per-recording text files into a
//! typed table with one row per recording.

pub mod manifest;
pub mod loader;
pub mod table;
pub mod builder;
pub mod report;

pub use manifest::{Manifest, ManifestEntry, Manifests};
pub use loader::{parse_samples, read_samples, RecordingLoader};
pub use table::{Column, Dataset, DatasetRow, SortOrder, ValueCounts};
pub use builder::{Assembly, DatasetBuilder, MissingPolicy};
pub use report::DatasetReport;
