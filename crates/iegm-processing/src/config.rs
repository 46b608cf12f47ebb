//! Configuration for segment processing

use crate::filters::{BandPassFilter, BANDPASS_ORDER};
use iegm_core::{config_error, IegmResult, DEFAULT_SAMPLING_RATE};
use serde::{Deserialize, Serialize};

/// Optional band-pass applied to segments before plotting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPassConfig {
    /// Low cutoff (Hz)
    pub low_cutoff: f32,
    /// High cutoff (Hz)
    pub high_cutoff: f32,
    /// Order of each Butterworth stage
    #[serde(default = "default_order")]
    pub order: usize,
}

fn default_order() -> usize {
    BANDPASS_ORDER
}

impl BandPassConfig {
    pub fn new(low_cutoff: f32, high_cutoff: f32) -> Self {
        Self {
            low_cutoff,
            high_cutoff,
            order: BANDPASS_ORDER,
        }
    }
}

/// Processing parameters shared by reporting and visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Sampling rate of the recordings (Hz)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f32,
    /// Band-pass applied to plotted segments
    #[serde(default)]
    pub bandpass: Option<BandPassConfig>,
}

fn default_sampling_rate() -> f32 {
    DEFAULT_SAMPLING_RATE
}

impl ProcessingConfig {
    /// Validate the configuration, designing the filter if one is set
    pub fn validate(&self) -> IegmResult<()> {
        if self.sampling_rate <= 0.0 || !self.sampling_rate.is_finite() {
            return Err(config_error!("Sampling rate must be positive, got {}", self.sampling_rate));
        }

        self.bandpass_filter().map(|_| ())
    }

    /// Design the configured band-pass filter, if any
    pub fn bandpass_filter(&self) -> IegmResult<Option<BandPassFilter>> {
        self.bandpass
            .as_ref()
            .map(|bp| BandPassFilter::new(bp.low_cutoff, bp.high_cutoff, self.sampling_rate, bp.order))
            .transpose()
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> IegmResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| config_error!("Failed to deserialize configuration: {}", e))
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        ProcessingConfig {
            sampling_rate: DEFAULT_SAMPLING_RATE,
            bandpass: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iegm_core::IegmError;

    #[test]
    fn test_default_config() {
        let config = ProcessingConfig::default();
        assert_eq!(config.sampling_rate, 250.0);
        assert!(config.validate().is_ok());
        assert!(config.bandpass_filter().unwrap().is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ProcessingConfig::default();
        config.sampling_rate = 0.0;
        assert!(matches!(config.validate(), Err(IegmError::InvalidConfig { .. })));

        let config = ProcessingConfig {
            sampling_rate: 250.0,
            bandpass: Some(BandPassConfig::new(1.0, 130.0)),
        };
        assert!(matches!(config.validate(), Err(IegmError::FilterDesign { .. })));
    }

    #[test]
    fn test_json_serialization() {
        let config = ProcessingConfig {
            sampling_rate: 500.0,
            bandpass: Some(BandPassConfig::new(0.5, 40.0)),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ProcessingConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_defaults() {
        let config = ProcessingConfig::from_json(r#"{"bandpass": {"low_cutoff": 1.0, "high_cutoff": 30.0}}"#).unwrap();
        assert_eq!(config.sampling_rate, 250.0);
        assert_eq!(config.bandpass.unwrap().order, 6);

        assert!(ProcessingConfig::from_json("{not json").is_err());
    }
}
