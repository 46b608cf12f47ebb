//! Digital Butterworth filters for IEGM segments

use iegm_core::{design_error, IegmError, IegmResult, IegmSegment};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Order of each stage of [`bp_filter`]
pub const BANDPASS_ORDER: usize = 6;

/// Highest filter order accepted by the designer
const MAX_ORDER: usize = 16;

/// Filter types supported by the designer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterType {
    /// Butterworth lowpass filter
    ButterworthLowpass,
    /// Butterworth highpass filter
    ButterworthHighpass,
}

/// Filter configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Filter type
    pub filter_type: FilterType,
    /// Filter order
    pub order: usize,
    /// Cutoff (-3 dB) frequency in Hz
    pub cutoff_freq: f32,
}

impl FilterConfig {
    /// Create lowpass filter configuration
    pub fn lowpass(cutoff_freq: f32, order: usize) -> Self {
        Self {
            filter_type: FilterType::ButterworthLowpass,
            order,
            cutoff_freq,
        }
    }

    /// Create highpass filter configuration
    pub fn highpass(cutoff_freq: f32, order: usize) -> Self {
        Self {
            filter_type: FilterType::ButterworthHighpass,
            order,
            cutoff_freq,
        }
    }
}

/// Single second-order section
///
/// Coefficients: y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2].
/// First-order sections have `b2 == a2 == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BiquadSection {
    b0: f64, b1: f64, b2: f64,
    a1: f64, a2: f64,
}

impl BiquadSection {
    /// Gain for a constant input
    fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Transposed direct form II state reached after a long unit step
    fn step_state(&self) -> [f64; 2] {
        let gain = self.dc_gain();
        let z2 = self.b2 - self.a2 * gain;
        let z1 = self.b1 - self.a1 * gain + z2;
        [z1, z2]
    }

    /// Filter `data` in place starting from `state`
    fn run(&self, data: &mut [f64], state: [f64; 2]) {
        let [mut z1, mut z2] = state;

        for sample in data.iter_mut() {
            let x = *sample;
            let y = self.b0 * x + z1;
            z1 = self.b1 * x - self.a1 * y + z2;
            z2 = self.b2 * x - self.a2 * y;
            *sample = y;
        }
    }

    /// Complex response at `z`
    fn response(&self, z: Complex64) -> Complex64 {
        let z_inv = z.inv();
        let z_inv2 = z_inv * z_inv;
        (self.b0 + z_inv * self.b1 + z_inv2 * self.b2)
            / (1.0 + z_inv * self.a1 + z_inv2 * self.a2)
    }
}

/// Butterworth filter realised as cascaded second-order sections
#[derive(Debug, Clone)]
pub struct ButterworthFilter {
    filter_config: FilterConfig,
    sections: Vec<BiquadSection>,
    sampling_rate: f32,
}

impl ButterworthFilter {
    /// Design the filter for a sampling rate
    ///
    /// Uses the bilinear transform with cutoff pre-warping, so the -3 dB
    /// point lands exactly on `cutoff_freq`.
    pub fn design(filter_config: FilterConfig, sampling_rate: f32) -> IegmResult<Self> {
        let order = filter_config.order;
        let cutoff = filter_config.cutoff_freq;

        if order == 0 || order > MAX_ORDER {
            return Err(design_error!("Order must be between 1 and {}, got {}", MAX_ORDER, order));
        }
        if sampling_rate <= 0.0 || !sampling_rate.is_finite() {
            return Err(design_error!("Sampling rate must be positive, got {}", sampling_rate));
        }
        if cutoff <= 0.0 || cutoff >= sampling_rate / 2.0 || !cutoff.is_finite() {
            return Err(design_error!(
                "Cutoff frequency {}Hz must lie strictly between 0 and Nyquist ({}Hz)",
                cutoff,
                sampling_rate / 2.0
            ));
        }

        let highpass = filter_config.filter_type == FilterType::ButterworthHighpass;

        // Pre-warp frequency for bilinear transform
        let k = (std::f64::consts::PI * cutoff as f64 / sampling_rate as f64).tan();
        let k2 = k * k;

        let mut sections = Vec::with_capacity((order + 1) / 2);

        // Conjugate pole pairs of the analog prototype
        for m in 0..order / 2 {
            let angle = std::f64::consts::PI * (2 * m + order + 1) as f64 / (2 * order) as f64;
            let inv_q = -2.0 * angle.cos();
            let norm = 1.0 / (1.0 + inv_q * k + k2);

            let (b0, b1) = if highpass {
                (norm, -2.0 * norm)
            } else {
                (k2 * norm, 2.0 * k2 * norm)
            };

            sections.push(BiquadSection {
                b0,
                b1,
                b2: b0,
                a1: 2.0 * (k2 - 1.0) * norm,
                a2: (1.0 - inv_q * k + k2) * norm,
            });
        }

        // Real pole for odd orders
        if order % 2 == 1 {
            let norm = 1.0 / (1.0 + k);
            let (b0, b1) = if highpass { (norm, -norm) } else { (k * norm, k * norm) };

            sections.push(BiquadSection {
                b0,
                b1,
                b2: 0.0,
                a1: (k - 1.0) * norm,
                a2: 0.0,
            });
        }

        Ok(ButterworthFilter {
            filter_config,
            sections,
            sampling_rate,
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.filter_config
    }

    pub fn sampling_rate(&self) -> f32 {
        self.sampling_rate
    }

    /// Number of samples mirrored onto each end by [`filtfilt`](Self::filtfilt)
    pub fn padlen(&self) -> usize {
        3 * (self.filter_config.order + 1)
    }

    /// Magnitude of the frequency response at `freq` Hz
    pub fn magnitude_response(&self, freq: f32) -> f64 {
        let omega = 2.0 * std::f64::consts::PI * freq as f64 / self.sampling_rate as f64;
        let z = Complex64::from_polar(1.0, omega);

        self.sections
            .iter()
            .map(|section| section.response(z))
            .product::<Complex64>()
            .norm()
    }

    /// Zero-phase forward-backward filtering
    ///
    /// Both ends are extended by an odd reflection of [`padlen`](Self::padlen)
    /// samples and every section starts from its steady state for the first
    /// sample, which keeps start-up transients out of the result. The output
    /// has the same length as the input.
    pub fn filtfilt(&self, data: &[f32]) -> IegmResult<Vec<f32>> {
        let padlen = self.padlen();
        if data.len() <= padlen {
            return Err(IegmError::SignalTooShort {
                length: data.len(),
                required: padlen,
            });
        }

        let mut buffer = odd_extend(data, padlen);

        self.run_from_steady_state(&mut buffer);
        buffer.reverse();
        self.run_from_steady_state(&mut buffer);
        buffer.reverse();

        Ok(buffer[padlen..padlen + data.len()]
            .iter()
            .map(|&x| x as f32)
            .collect())
    }

    /// Run all sections as if the first sample had been applied forever
    fn run_from_steady_state(&self, data: &mut [f64]) {
        let Some(&first) = data.first() else {
            return;
        };

        // Each section sees the first sample scaled by the gain of the
        // sections before it
        let mut input_level = first;
        for section in &self.sections {
            let [z1, z2] = section.step_state();
            section.run(data, [z1 * input_level, z2 * input_level]);
            input_level *= section.dc_gain();
        }
    }
}

/// Odd reflection of `padlen` samples about each end point
fn odd_extend(data: &[f32], padlen: usize) -> Vec<f64> {
    let n = data.len();
    let first = data[0] as f64;
    let last = data[n - 1] as f64;

    let mut extended = Vec::with_capacity(n + 2 * padlen);
    extended.extend((1..=padlen).rev().map(|i| 2.0 * first - data[i] as f64));
    extended.extend(data.iter().map(|&x| x as f64));
    extended.extend((1..=padlen).map(|i| 2.0 * last - data[n - 1 - i] as f64));

    extended
}

/// Band-pass built from a Butterworth low-pass followed by a high-pass
#[derive(Debug, Clone)]
pub struct BandPassFilter {
    lowpass: ButterworthFilter,
    highpass: ButterworthFilter,
}

impl BandPassFilter {
    /// Design both stages; requires `0 < low_cutoff < high_cutoff < fs/2`
    pub fn new(low_cutoff: f32, high_cutoff: f32, sampling_rate: f32, order: usize) -> IegmResult<Self> {
        if low_cutoff >= high_cutoff {
            return Err(design_error!(
                "Low cutoff ({}Hz) must be less than high cutoff ({}Hz)",
                low_cutoff,
                high_cutoff
            ));
        }

        let lowpass = ButterworthFilter::design(FilterConfig::lowpass(high_cutoff, order), sampling_rate)?;
        let highpass = ButterworthFilter::design(FilterConfig::highpass(low_cutoff, order), sampling_rate)?;

        Ok(BandPassFilter { lowpass, highpass })
    }

    pub fn low_cutoff(&self) -> f32 {
        self.highpass.config().cutoff_freq
    }

    pub fn high_cutoff(&self) -> f32 {
        self.lowpass.config().cutoff_freq
    }

    pub fn sampling_rate(&self) -> f32 {
        self.lowpass.sampling_rate()
    }

    /// Zero-phase low-pass, then zero-phase high-pass
    pub fn apply(&self, data: &[f32]) -> IegmResult<Vec<f32>> {
        let smoothed = self.lowpass.filtfilt(data)?;
        self.highpass.filtfilt(&smoothed)
    }

    /// Filter a segment recorded at the filter's sampling rate
    pub fn process(&self, segment: &IegmSegment) -> IegmResult<IegmSegment> {
        if segment.sampling_rate != self.sampling_rate() {
            return Err(IegmError::InvalidConfig {
                reason: format!(
                    "Segment sampled at {}Hz, filter designed for {}Hz",
                    segment.sampling_rate,
                    self.sampling_rate()
                ),
            });
        }

        Ok(segment.with_data(self.apply(&segment.data)?))
    }
}

/// Digital band pass filter (6th-order Butterworth stages)
///
/// `data` is a time series, `(f_lo, f_hi)` the band to keep in Hz and `fs`
/// the sampling frequency in Hz. Returns band-pass filtered data of the same
/// length.
pub fn bp_filter(data: &[f32], f_lo: f32, f_hi: f32, fs: f32) -> IegmResult<Vec<f32>> {
    BandPassFilter::new(f_lo, f_hi, fs, BANDPASS_ORDER)?.apply(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FS: f32 = 250.0;
    const N: usize = 1250;

    fn sine(freq: f32) -> Vec<f32> {
        (0..N)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / FS).sin())
            .collect()
    }

    /// RMS over the central part, away from the edges
    fn central_rms(data: &[f32]) -> f32 {
        let middle = &data[N / 5..N - N / 5];
        (middle.iter().map(|x| x * x).sum::<f32>() / middle.len() as f32).sqrt()
    }

    #[test]
    fn test_lowpass_unity_dc_gain() {
        for order in 1..=8 {
            let filter = ButterworthFilter::design(FilterConfig::lowpass(40.0, order), FS).unwrap();
            assert!((filter.magnitude_response(0.0) - 1.0).abs() < 1e-9, "order {}", order);
        }
    }

    #[test]
    fn test_highpass_unity_nyquist_gain() {
        for order in 1..=8 {
            let filter = ButterworthFilter::design(FilterConfig::highpass(5.0, order), FS).unwrap();
            assert!((filter.magnitude_response(FS / 2.0) - 1.0).abs() < 1e-9, "order {}", order);
            assert!(filter.magnitude_response(0.0) < 1e-9);
        }
    }

    #[test]
    fn test_cutoff_is_half_power_point() {
        let lowpass = ButterworthFilter::design(FilterConfig::lowpass(40.0, 6), FS).unwrap();
        let highpass = ButterworthFilter::design(FilterConfig::highpass(5.0, 5), FS).unwrap();
        let half_power = std::f64::consts::FRAC_1_SQRT_2;

        assert!((lowpass.magnitude_response(40.0) - half_power).abs() < 1e-6);
        assert!((highpass.magnitude_response(5.0) - half_power).abs() < 1e-6);
    }

    #[test]
    fn test_design_validation() {
        assert!(ButterworthFilter::design(FilterConfig::lowpass(40.0, 0), FS).is_err());
        assert!(ButterworthFilter::design(FilterConfig::lowpass(125.0, 6), FS).is_err());
        assert!(ButterworthFilter::design(FilterConfig::highpass(0.0, 6), FS).is_err());
        assert!(ButterworthFilter::design(FilterConfig::highpass(5.0, 6), 0.0).is_err());
        assert!(BandPassFilter::new(40.0, 5.0, FS, 6).is_err());
        assert!(BandPassFilter::new(5.0, 5.0, FS, 6).is_err());
    }

    #[test]
    fn test_filtfilt_preserves_constant() {
        let filter = ButterworthFilter::design(FilterConfig::lowpass(30.0, 6), FS).unwrap();
        let output = filter.filtfilt(&vec![3.0; 200]).unwrap();

        assert_eq!(output.len(), 200);
        assert!(output.iter().all(|x| (x - 3.0).abs() < 1e-4));
    }

    #[test]
    fn test_filtfilt_rejects_short_signal() {
        let filter = ButterworthFilter::design(FilterConfig::lowpass(30.0, 6), FS).unwrap();
        let err = filter.filtfilt(&[0.0; 21]).unwrap_err();
        assert_eq!(err, IegmError::SignalTooShort { length: 21, required: 21 });
        assert!(filter.filtfilt(&[0.0; 22]).is_ok());
    }

    #[test]
    fn test_filtfilt_has_no_phase_shift() {
        let filter = ButterworthFilter::design(FilterConfig::lowpass(40.0, 6), FS).unwrap();
        let input = sine(10.0);
        let output = filter.filtfilt(&input).unwrap();

        // A causal filter would delay the 10 Hz wave noticeably
        let max_error = input[N / 5..N - N / 5]
            .iter()
            .zip(&output[N / 5..N - N / 5])
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_error < 0.01, "max error {}", max_error);
    }

    #[test]
    fn test_bp_filter_preserves_shape() {
        for len in [22, 100, N] {
            let data: Vec<f32> = (0..len).map(|i| (i as f32 * 0.3).cos()).collect();
            assert_eq!(bp_filter(&data, 5.0, 40.0, FS).unwrap().len(), len);
        }
    }

    #[test]
    fn test_bp_filter_passes_band_center() {
        let input = sine(15.0);
        let output = bp_filter(&input, 5.0, 40.0, FS).unwrap();

        let ratio = central_rms(&output) / central_rms(&input);
        assert!((0.95..1.05).contains(&ratio), "ratio {}", ratio);
    }

    #[test]
    fn test_bp_filter_attenuates_out_of_band() {
        for freq in [1.0, 100.0] {
            let input = sine(freq);
            let output = bp_filter(&input, 5.0, 40.0, FS).unwrap();

            let ratio = central_rms(&output) / central_rms(&input);
            assert!(ratio < 0.05, "{}Hz ratio {}", freq, ratio);
        }
    }

    #[test]
    fn test_bp_filter_reduces_white_noise_power() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise: Vec<f32> = (0..N).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let output = bp_filter(&noise, 5.0, 40.0, FS).unwrap();

        let ratio = central_rms(&output) / central_rms(&noise);
        assert!(ratio < 0.75, "ratio {}", ratio);
        assert!(ratio > 0.2, "ratio {}", ratio);
    }

    #[test]
    fn test_process_checks_sampling_rate() {
        let filter = BandPassFilter::new(5.0, 40.0, FS, BANDPASS_ORDER).unwrap();
        let segment = IegmSegment::new(sine(15.0), FS).unwrap();
        let filtered = filter.process(&segment).unwrap();
        assert_eq!(filtered.len(), segment.len());

        let other_rate = IegmSegment::new(sine(15.0), 500.0).unwrap();
        assert!(filter.process(&other_rate).is_err());
    }
}
