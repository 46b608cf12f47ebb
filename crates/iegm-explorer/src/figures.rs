//! Plot-ready figures built from the assembled dataset
//!
//! A figure pairs a time-domain view with the DFT magnitude of the same
//! traces. Comparison figures hold the first example of every fine label in
//! one coarse class; an inspection figure shows a single recording against
//! sample index and normalized frequency.

use iegm_core::{IegmResult, IegmSegment, SummaryStats};
use iegm_dataset::{Dataset, DatasetRow};
use iegm_processing::{BandPassFilter, ProcessingConfig, Spectrum};
use std::fmt;

/// Horizontal axis of the time-domain view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAxis {
    Seconds,
    SampleIndex,
}

impl TimeAxis {
    pub fn label(&self) -> &'static str {
        match self {
            TimeAxis::Seconds => "Time (s)",
            TimeAxis::SampleIndex => "Sample",
        }
    }

    /// Matching frequency unit of the spectrum view
    pub fn frequency_label(&self) -> &'static str {
        match self {
            TimeAxis::Seconds => "Frequency (Hz)",
            TimeAxis::SampleIndex => "Frequency (cycles/sample)",
        }
    }
}

/// One named sequence in both domains
#[derive(Debug, Clone)]
pub struct Trace {
    pub name: String,
    pub time_points: Vec<[f64; 2]>,
    /// Non-negative half of the magnitude spectrum
    pub spectrum_points: Vec<[f64; 2]>,
    /// Strongest non-DC component, in the spectrum's frequency unit
    pub peak_frequency: Option<f32>,
    pub stats: Option<SummaryStats>,
}

impl Trace {
    fn new(name: impl Into<String>, segment: &IegmSegment, axis: TimeAxis) -> Self {
        let (times, spectrum) = match axis {
            TimeAxis::Seconds => (
                segment.time_vector(),
                Spectrum::compute(&segment.data, segment.sampling_rate),
            ),
            TimeAxis::SampleIndex => (
                (0..segment.len()).map(|i| i as f32).collect(),
                Spectrum::normalized(&segment.data),
            ),
        };

        let time_points = times
            .iter()
            .zip(&segment.data)
            .map(|(&t, &v)| [t as f64, v as f64])
            .collect();

        let spectrum_points = spectrum
            .non_negative()
            .into_iter()
            .map(|(f, m)| [f as f64, m as f64])
            .collect();

        Trace {
            name: name.into(),
            time_points,
            spectrum_points,
            peak_frequency: spectrum.peak_frequency(),
            stats: segment.stats(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub axis: TimeAxis,
    pub traces: Vec<Trace>,
}

/// Summary statistics of every trace, one table per trace
impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;

        for trace in &self.traces {
            writeln!(f, "{}", trace.name)?;
            match &trace.stats {
                Some(stats) => {
                    for (name, value) in stats.rows() {
                        writeln!(f, "  {:<8}{:>14.6}", name, value)?;
                    }
                }
                None => writeln!(f, "  (empty)")?,
            }
            if let Some(peak) = trace.peak_frequency {
                writeln!(f, "  {:<8}{:>14.6}", "peak", peak)?;
            }
        }
        Ok(())
    }
}

/// Turns dataset rows into figures, band-passing them first when configured
#[derive(Debug, Clone)]
pub struct FigureBuilder {
    filter: Option<BandPassFilter>,
}

impl FigureBuilder {
    pub fn new(config: &ProcessingConfig) -> IegmResult<Self> {
        Ok(FigureBuilder {
            filter: config.bandpass_filter()?,
        })
    }

    fn segment(&self, row: &DatasetRow) -> IegmResult<IegmSegment> {
        match &self.filter {
            Some(filter) => filter.process(&row.data),
            None => Ok(row.data.clone()),
        }
    }

    fn title(&self, base: String) -> String {
        match &self.filter {
            Some(filter) => format!(
                "{} (band-pass {}-{} Hz)",
                base,
                filter.low_cutoff(),
                filter.high_cutoff()
            ),
            None => base,
        }
    }

    /// One figure per coarse class with the first recording of each label
    pub fn comparison_figures(&self, dataset: &Dataset) -> IegmResult<Vec<Figure>> {
        dataset
            .classes()
            .into_iter()
            .map(|class| {
                let rows = dataset.first_per_label(class);

                let traces = rows
                    .iter()
                    .map(|row| {
                        let segment = self.segment(row)?;
                        Ok(Trace::new(row.label.code(), &segment, TimeAxis::Seconds))
                    })
                    .collect::<IegmResult<Vec<_>>>()?;

                let codes: Vec<&str> = rows.iter().map(|row| row.label.code()).collect();

                Ok(Figure {
                    title: self.title(codes.join(",")),
                    axis: TimeAxis::Seconds,
                    traces,
                })
            })
            .collect()
    }

    /// Single recording against sample index and normalized frequency
    pub fn inspect_figure(&self, row: &DatasetRow) -> IegmResult<Figure> {
        let segment = self.segment(row)?;
        let trace = Trace::new(row.file_name.as_str(), &segment, TimeAxis::SampleIndex);

        Ok(Figure {
            title: self.title(row.file_name.clone()),
            axis: TimeAxis::SampleIndex,
            traces: vec![trace],
        })
    }
}
