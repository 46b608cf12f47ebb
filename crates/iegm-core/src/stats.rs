//! Descriptive statistics for a single sequence

use serde::{Deserialize, Serialize};

/// Summary statistics for one recording
///
/// Variance and standard deviation use the sample (n - 1) normalisation,
/// skewness is the adjusted Fisher-Pearson coefficient and kurtosis is the
/// unbiased excess kurtosis. Statistics undefined for short inputs are NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub idx_min: usize,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub mean: f64,
    pub max: f64,
    pub idx_max: usize,
    /// Mean absolute deviation around the mean
    pub mad: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl SummaryStats {
    /// Compute statistics; `None` for an empty sequence
    pub fn calculate(data: &[f32]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let values: Vec<f64> = data.iter().map(|&x| x as f64).collect();
        let n = values.len() as f64;

        let mean = values.iter().sum::<f64>() / n;

        let (mut idx_min, mut idx_max) = (0, 0);
        for (i, &x) in values.iter().enumerate() {
            if x < values[idx_min] {
                idx_min = i;
            }
            if x > values[idx_max] {
                idx_max = i;
            }
        }

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        // Central moments
        let m2 = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let m3 = values.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n;
        let m4 = values.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n;

        let mad = values.iter().map(|x| (x - mean).abs()).sum::<f64>() / n;

        let variance = if values.len() > 1 {
            m2 * n / (n - 1.0)
        } else {
            f64::NAN
        };

        let skewness = if values.len() < 3 {
            f64::NAN
        } else if m2 == 0.0 {
            0.0
        } else {
            let g1 = m3 / m2.powf(1.5);
            (n * (n - 1.0)).sqrt() / (n - 2.0) * g1
        };

        let kurtosis = if values.len() < 4 {
            f64::NAN
        } else if m2 == 0.0 {
            0.0
        } else {
            let g2 = m4 / (m2 * m2) - 3.0;
            ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
        };

        Some(SummaryStats {
            count: values.len(),
            min: values[idx_min],
            idx_min,
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            mean,
            max: values[idx_max],
            idx_max,
            mad,
            variance,
            std_dev: variance.sqrt(),
            skewness,
            kurtosis,
        })
    }

    /// Named rows in display order
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("count", self.count as f64),
            ("min", self.min),
            ("idxmin", self.idx_min as f64),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("mean", self.mean),
            ("max", self.max),
            ("idxmax", self.idx_max as f64),
            ("mad", self.mad),
            ("var", self.variance),
            ("std", self.std_dev),
            ("skew", self.skewness),
            ("kurt", self.kurtosis),
        ]
    }
}

/// Linear-interpolation quantile of pre-sorted data
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
