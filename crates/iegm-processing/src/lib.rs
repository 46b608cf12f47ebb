//! IEGM-Processing: Filtering and spectral analysis for IEGM segments
//!
//! Zero-phase Butterworth filtering, the band-pass used for visual
//! inspection, and FFT helpers for frequency-domain plots.

pub mod filters;
pub mod spectrum;
pub mod config;

pub use filters::{
    bp_filter, BandPassFilter, ButterworthFilter, FilterConfig, FilterType, BANDPASS_ORDER,
};
pub use spectrum::{fft, fft_frequencies, Spectrum};
pub use config::{BandPassConfig, ProcessingConfig};
