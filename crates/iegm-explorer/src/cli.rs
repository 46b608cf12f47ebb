use crate::config::ExplorerConfig;
use clap::Parser;
use iegm_core::IegmResult;
use iegm_dataset::MissingPolicy;
use iegm_processing::BandPassConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "iegm-explorer",
    version,
    about = "Assemble an IEGM recording dataset, report its class balance and plot examples",
    long_about = "Reads train_indice.csv and test_indice.csv from the indices directory, loads\n\
                  every listed recording from the data directory and prints value counts per\n\
                  partition, class and label. Flags override values from --config."
)]
pub struct Cli {
    /// Samples per recording [default: 1250]
    #[arg(long)]
    pub size: Option<usize>,

    /// Directory with the recording text files [default: ./data/]
    #[arg(long = "path_data", alias = "path-data")]
    pub path_data: Option<PathBuf>,

    /// Directory with train_indice.csv and test_indice.csv [default: ./data_indices]
    #[arg(long = "path_indices", alias = "path-indices")]
    pub path_indices: Option<PathBuf>,

    /// Sampling rate of the recordings in Hz [default: 250]
    #[arg(long = "sampling-rate")]
    pub sampling_rate: Option<f32>,

    /// Band-pass plotted signals between LO and HI Hz
    #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
    pub bandpass: Option<Vec<f32>>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail when a listed recording has no file
    #[arg(long)]
    pub strict: bool,

    /// Add a figure for one recording (file name)
    #[arg(long)]
    pub inspect: Option<String>,

    /// Print summary statistics of the plotted examples
    #[arg(long)]
    pub describe: bool,

    /// Skip the plot window
    #[arg(long)]
    pub no_plot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Configuration file (or defaults) with flag overrides, validated
    pub fn resolve_config(&self) -> IegmResult<ExplorerConfig> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::from_path(path)?,
            None => ExplorerConfig::default(),
        };

        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut ExplorerConfig) {
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(path) = &self.path_data {
            config.path_data = path.clone();
        }
        if let Some(path) = &self.path_indices {
            config.path_indices = path.clone();
        }
        if let Some(rate) = self.sampling_rate {
            config.processing.sampling_rate = rate;
        }
        if let Some([lo, hi]) = self.bandpass.as_deref() {
            let order = config
                .processing
                .bandpass
                .as_ref()
                .map(|bp| bp.order)
                .unwrap_or(iegm_processing::BANDPASS_ORDER);
            config.processing.bandpass = Some(BandPassConfig {
                low_cutoff: *lo,
                high_cutoff: *hi,
                order,
            });
        }
        if self.strict {
            config.missing = MissingPolicy::Fail;
        }
    }

    /// Log level for the `-v` count
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
