//! Dataset assembly from manifests and recording files

use crate::loader::RecordingLoader;
use crate::manifest::{Manifest, Manifests};
use crate::table::Dataset;
use iegm_core::{IegmError, IegmResult, Partition};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// What to do when a manifest entry has no recording file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Log a warning and leave the entry out of the table
    #[default]
    Skip,
    /// Abort assembly with [`IegmError::MissingRecording`]
    Fail,
}

/// Assembled table plus the recordings that were left out
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub dataset: Dataset,
    /// Paths of skipped recordings, in manifest order
    pub missing: Vec<PathBuf>,
}

/// Builds a [`Dataset`] from manifests
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    loader: RecordingLoader,
    policy: MissingPolicy,
}

impl DatasetBuilder {
    pub fn new(loader: RecordingLoader, policy: MissingPolicy) -> Self {
        DatasetBuilder { loader, policy }
    }

    /// Load every entry of one manifest into `assembly`
    pub fn add_manifest(&self, assembly: &mut Assembly, manifest: &Manifest) -> IegmResult<()> {
        let partition = manifest.partition();
        let before = assembly.dataset.len();

        for entry in manifest.iter() {
            match self.loader.load_row(entry, partition)? {
                Some(row) => assembly.dataset.push(row),
                None => {
                    let path = self.loader.recording_path(&entry.file_name);
                    if self.policy == MissingPolicy::Fail {
                        return Err(IegmError::MissingRecording { path });
                    }
                    assembly.missing.push(path);
                }
            }
        }

        info!(
            %partition,
            rows = assembly.dataset.len() - before,
            entries = manifest.len(),
            "loaded partition"
        );
        Ok(())
    }

    /// Assemble both partitions, test first
    pub fn build(&self, manifests: &Manifests) -> IegmResult<Assembly> {
        let mut assembly = Assembly::default();

        for partition in Partition::ASSEMBLY_ORDER {
            self.add_manifest(&mut assembly, manifests.get(partition))?;
        }

        if !assembly.missing.is_empty() {
            info!(missing = assembly.missing.len(), "skipped recordings without files");
        }
        Ok(assembly)
    }
}
