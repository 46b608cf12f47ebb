//! Dataset partitions, rhythm labels and the recording file-name convention

use crate::error::{IegmError, IegmResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset partition a recording belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    /// Both partitions, in the order they are assembled
    pub const ASSEMBLY_ORDER: [Partition; 2] = [Partition::Test, Partition::Train];

    /// Tag stored in the `Mode` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Test => "test",
        }
    }

    /// Manifest file name inside the indices directory
    pub fn manifest_file_name(&self) -> &'static str {
        match self {
            Partition::Train => "train_indice.csv",
            Partition::Test => "test_indice.csv",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained rhythm label encoded in a recording's file name
///
/// Variant order is the display order used when grouping examples:
/// supraventricular and benign rhythms first, ventricular ones after, then
/// any unrecognised codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RhythmLabel {
    /// Atrial flutter
    Aft,
    /// Supraventricular tachycardia
    Svt,
    /// Ventricular premature depolarisation
    Vpd,
    /// Atrial fibrillation
    Afb,
    /// Sinus rhythm
    Sr,
    /// Ventricular flutter
    Vft,
    /// Ventricular fibrillation
    Vfb,
    /// Ventricular tachycardia
    Vt,
    /// Any code not listed above
    Other(String),
}

impl RhythmLabel {
    /// Parse a label code as it appears in file names (case-sensitive)
    pub fn from_code(code: &str) -> Self {
        match code {
            "AFt" => RhythmLabel::Aft,
            "SVT" => RhythmLabel::Svt,
            "VPD" => RhythmLabel::Vpd,
            "AFb" => RhythmLabel::Afb,
            "SR" => RhythmLabel::Sr,
            "VFt" => RhythmLabel::Vft,
            "VFb" => RhythmLabel::Vfb,
            "VT" => RhythmLabel::Vt,
            other => RhythmLabel::Other(other.to_string()),
        }
    }

    /// Label code as it appears in file names
    pub fn code(&self) -> &str {
        match self {
            RhythmLabel::Aft => "AFt",
            RhythmLabel::Svt => "SVT",
            RhythmLabel::Vpd => "VPD",
            RhythmLabel::Afb => "AFb",
            RhythmLabel::Sr => "SR",
            RhythmLabel::Vft => "VFt",
            RhythmLabel::Vfb => "VFb",
            RhythmLabel::Vt => "VT",
            RhythmLabel::Other(code) => code,
        }
    }
}

impl fmt::Display for RhythmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Metadata derived from a `<PatientID>-<Label>-...` file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingName {
    pub file_name: String,
    pub patient_id: String,
    pub label: RhythmLabel,
}

impl RecordingName {
    /// Split a file name on `-` into patient ID and fine label
    pub fn parse(file_name: &str) -> IegmResult<Self> {
        let mut parts = file_name.split('-');
        let patient_id = parts.next().unwrap_or_default();
        let label = parts.next().unwrap_or_default();

        if patient_id.is_empty() || label.is_empty() {
            return Err(IegmError::InvalidFileName {
                name: file_name.to_string(),
            });
        }

        Ok(RecordingName {
            file_name: file_name.to_string(),
            patient_id: patient_id.to_string(),
            label: RhythmLabel::from_code(label),
        })
    }
}
