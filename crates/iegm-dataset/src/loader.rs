//! Recording loader: one text file per IEGM segment

use crate::manifest::ManifestEntry;
use crate::table::DatasetRow;
use iegm_core::{config_error, IegmError, IegmResult, IegmSegment, Partition, RecordingName};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads recordings from a data directory into dataset rows
#[derive(Debug, Clone)]
pub struct RecordingLoader {
    data_dir: PathBuf,
    size: usize,
    sampling_rate: f32,
}

impl RecordingLoader {
    /// `size` is the exact number of samples expected per recording
    pub fn new(data_dir: impl Into<PathBuf>, size: usize, sampling_rate: f32) -> IegmResult<Self> {
        if size == 0 {
            return Err(config_error!("Segment size must be positive"));
        }
        if sampling_rate <= 0.0 || !sampling_rate.is_finite() {
            return Err(config_error!("Sampling rate must be positive, got {}", sampling_rate));
        }

        Ok(RecordingLoader {
            data_dir: data_dir.into(),
            size,
            sampling_rate,
        })
    }

    /// Location of a recording inside the data directory
    pub fn recording_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// Load one manifest entry
    ///
    /// Returns `Ok(None)` when the recording file does not exist; the caller
    /// decides whether that is fatal.
    pub fn load_row(&self, entry: &ManifestEntry, partition: Partition) -> IegmResult<Option<DatasetRow>> {
        let path = self.recording_path(&entry.file_name);

        if !path.is_file() {
            warn!(path = %path.display(), "recording does not exist");
            return Ok(None);
        }

        let name = RecordingName::parse(&entry.file_name)?;
        let samples = read_samples(&path, self.size)?;
        let segment = IegmSegment::new(samples, self.sampling_rate)?;

        debug!(
            file = %entry.file_name,
            %partition,
            class = entry.class,
            seconds = segment.duration(),
            "loaded recording"
        );

        Ok(Some(DatasetRow::new(name, segment, partition, entry.class)))
    }
}

/// Read exactly `size` samples from a recording file
pub fn read_samples(path: &Path, size: usize) -> IegmResult<Vec<f32>> {
    let file = File::open(path).map_err(|e| IegmError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_samples(BufReader::new(file), size, path)
}

/// Parse one sample per line
///
/// The first whitespace- or comma-separated token of each non-blank line is
/// the value; anything after it is ignored.
pub fn parse_samples<R: BufRead>(reader: R, size: usize, path: &Path) -> IegmResult<Vec<f32>> {
    let mut samples = Vec::with_capacity(size);

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| IegmError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let token = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .find(|t| !t.is_empty());

        let Some(token) = token else {
            continue;
        };

        let value = token.parse::<f32>().map_err(|_| IegmError::SampleParse {
            path: path.to_path_buf(),
            line: i + 1,
            value: token.to_string(),
        })?;
        samples.push(value);
    }

    if samples.len() != size {
        return Err(IegmError::SampleCountMismatch {
            path: path.to_path_buf(),
            expected: size,
            actual: samples.len(),
        });
    }

    Ok(samples)
}
