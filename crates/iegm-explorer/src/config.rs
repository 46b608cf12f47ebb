//! Explorer configuration: dataset locations plus processing parameters

use iegm_core::{config_error, IegmError, IegmResult, DEFAULT_SEGMENT_SIZE};
use iegm_dataset::MissingPolicy;
use iegm_processing::ProcessingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to assemble and plot the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Samples per recording
    pub size: usize,
    /// Directory holding the recording text files
    pub path_data: PathBuf,
    /// Directory holding `train_indice.csv` and `test_indice.csv`
    pub path_indices: PathBuf,
    /// Handling of manifest entries without a recording file
    pub missing: MissingPolicy,
    pub processing: ProcessingConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            size: DEFAULT_SEGMENT_SIZE,
            path_data: PathBuf::from("./data/"),
            path_indices: PathBuf::from("./data_indices"),
            missing: MissingPolicy::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> IegmResult<()> {
        if self.size == 0 {
            return Err(config_error!("Segment size must be positive"));
        }
        self.processing.validate()
    }

    pub fn from_json(json: &str) -> IegmResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| config_error!("Failed to deserialize configuration: {}", e))
    }

    /// Load from a JSON file; absent keys keep their defaults
    pub fn from_path(path: &Path) -> IegmResult<Self> {
        if !path.is_file() {
            return Err(IegmError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let json = std::fs::read_to_string(path).map_err(|e| IegmError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}
