//! IegmSegment: container for one single-channel IEGM recording

use crate::error::{IegmError, IegmResult};
use crate::stats::SummaryStats;
use serde::{Deserialize, Serialize};

/// Sampling rate of the recordings in the reference dataset (Hz)
pub const DEFAULT_SAMPLING_RATE: f32 = 250.0;

/// Samples per recording in the reference dataset (5 s at 250 Hz)
pub const DEFAULT_SEGMENT_SIZE: usize = 1250;

/// Single-channel IEGM segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IegmSegment {
    /// Samples in acquisition order
    pub data: Vec<f32>,
    /// Sampling rate in Hz
    pub sampling_rate: f32,
}

impl IegmSegment {
    /// Create a segment, validating the sampling rate
    pub fn new(data: Vec<f32>, sampling_rate: f32) -> IegmResult<Self> {
        if sampling_rate <= 0.0 || !sampling_rate.is_finite() {
            return Err(IegmError::InvalidConfig {
                reason: format!("Sampling rate must be positive, got {}", sampling_rate),
            });
        }

        Ok(IegmSegment { data, sampling_rate })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the segment holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.data.len() as f32 / self.sampling_rate
    }

    /// Sample times in seconds, for plotting
    pub fn time_vector(&self) -> Vec<f32> {
        let dt = 1.0 / self.sampling_rate;

        (0..self.data.len())
            .map(|i| i as f32 * dt)
            .collect()
    }

    /// Same sampling rate, new samples (e.g. after filtering)
    pub fn with_data(&self, data: Vec<f32>) -> IegmSegment {
        IegmSegment {
            data,
            sampling_rate: self.sampling_rate,
        }
    }

    /// Descriptive statistics of the samples
    pub fn stats(&self) -> Option<SummaryStats> {
        SummaryStats::calculate(&self.data)
    }
}
