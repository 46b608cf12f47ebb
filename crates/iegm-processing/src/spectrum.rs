//! Discrete Fourier transform helpers for frequency-domain plots

use rustfft::{num_complex::Complex, FftPlanner};

/// Full complex DFT of a real sequence
pub fn fft(data: &[f32]) -> Vec<Complex<f32>> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(data.len());

    let mut buffer: Vec<Complex<f32>> = data.iter()
        .map(|&x| Complex::new(x, 0.0))
        .collect();
    fft.process(&mut buffer);

    buffer
}

/// DFT bin centre frequencies, in the same order as [`fft`] output
///
/// Non-negative frequencies come first, followed by the negative ones:
/// `[0, 1, ..., (n-1)/2, -(n/2), ..., -1] / (n * sample_spacing)`.
pub fn fft_frequencies(n: usize, sample_spacing: f32) -> Vec<f32> {
    if n == 0 {
        return Vec::new();
    }

    let scale = 1.0 / (n as f32 * sample_spacing);
    let positive = (n - 1) / 2 + 1;

    (0..positive as i64)
        .chain(-((n / 2) as i64)..0)
        .map(|k| k as f32 * scale)
        .collect()
}

/// Spectrum of one sequence with its bin frequencies
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Bin frequencies (Hz, or cycles/sample when unnormalised)
    pub frequencies: Vec<f32>,
    /// Complex DFT values
    pub values: Vec<Complex<f32>>,
}

impl Spectrum {
    /// Spectrum with frequencies in Hz
    pub fn compute(data: &[f32], sampling_rate: f32) -> Self {
        Self {
            frequencies: fft_frequencies(data.len(), 1.0 / sampling_rate),
            values: fft(data),
        }
    }

    /// Spectrum with frequencies in cycles per sample
    pub fn normalized(data: &[f32]) -> Self {
        Self::compute(data, 1.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(frequency, magnitude)` pairs for the non-negative half, ascending
    pub fn non_negative(&self) -> Vec<(f32, f32)> {
        self.frequencies
            .iter()
            .zip(&self.values)
            .take_while(|(f, _)| **f >= 0.0)
            .map(|(&f, c)| (f, c.norm()))
            .collect()
    }

    /// Frequency of the largest non-DC magnitude in the non-negative half
    pub fn peak_frequency(&self) -> Option<f32> {
        self.non_negative()
            .into_iter()
            .skip(1)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(f, _)| f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_all_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_fft_frequencies_even() {
        let freqs = fft_frequencies(8, 0.1);
        assert_all_close(&freqs, &[0.0, 1.25, 2.5, 3.75, -5.0, -3.75, -2.5, -1.25]);
    }

    #[test]
    fn test_fft_frequencies_odd() {
        let freqs = fft_frequencies(5, 1.0);
        assert_all_close(&freqs, &[0.0, 0.2, 0.4, -0.4, -0.2]);
        assert!(fft_frequencies(0, 1.0).is_empty());
        assert_all_close(&fft_frequencies(1, 1.0), &[0.0]);
    }

    #[test]
    fn test_fft_of_impulse_is_flat() {
        let spectrum = fft(&[1.0, 0.0, 0.0, 0.0]);
        assert_eq!(spectrum.len(), 4);
        for value in spectrum {
            assert!((value.re - 1.0).abs() < 1e-6);
            assert!(value.im.abs() < 1e-6);
        }
        assert!(fft(&[]).is_empty());
    }

    #[test]
    fn test_peak_frequency_of_sine() {
        let fs = 250.0;
        let data: Vec<f32> = (0..1250)
            .map(|i| (2.0 * std::f32::consts::PI * 10.0 * i as f32 / fs).sin())
            .collect();

        let spectrum = Spectrum::compute(&data, fs);
        assert_eq!(spectrum.len(), 1250);
        assert!((spectrum.peak_frequency().unwrap() - 10.0).abs() < 1e-3);

        // Half of the energy of a real sine sits in the positive bin
        assert!((spectrum.values[50].norm() - 625.0).abs() < 1.0);
    }

    #[test]
    fn test_non_negative_half() {
        let spectrum = Spectrum::normalized(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let half = spectrum.non_negative();

        // n = 6: bins 0, 1/6, 2/6 are non-negative, 3/6 wraps to -0.5
        assert_eq!(half.len(), 3);
        assert_eq!(half[0].0, 0.0);
        assert!((half[0].1 - 21.0).abs() < 1e-4);
        assert!(half.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
