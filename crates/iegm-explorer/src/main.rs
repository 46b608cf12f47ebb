//! IEGM Explorer - dataset assembly, class-balance report and example plots

mod app;
mod cli;
mod config;
mod figures;
mod ui;

use anyhow::{anyhow, Context};
use app::ExplorerApp;
use clap::Parser;
use cli::Cli;
use figures::FigureBuilder;
use iegm_dataset::{DatasetBuilder, DatasetReport, Manifests, RecordingLoader};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config().context("invalid configuration")?;
    info!(?config, "resolved configuration");

    let manifests = Manifests::load(&config.path_indices).context("failed to load manifests")?;
    let loader = RecordingLoader::new(&config.path_data, config.size, config.processing.sampling_rate)?;
    let assembly = DatasetBuilder::new(loader, config.missing)
        .build(&manifests)
        .context("failed to assemble dataset")?;

    let report = DatasetReport::new(&assembly.dataset, &assembly.missing);
    println!("{}", report);

    let builder = FigureBuilder::new(&config.processing)?;
    let mut figures = builder
        .comparison_figures(&assembly.dataset)
        .context("failed to build figures")?;

    if let Some(name) = &cli.inspect {
        let row = assembly
            .dataset
            .get(name)
            .ok_or_else(|| anyhow!("recording '{}' is not in the dataset", name))?;
        figures.push(builder.inspect_figure(row).context("failed to build inspection figure")?);
    }

    if cli.describe {
        for figure in &figures {
            println!("{}", figure);
        }
    }

    if cli.no_plot {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    let app = ExplorerApp::new(figures, report.to_string());
    eframe::run_native("IEGM Explorer", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("failed to run viewer: {}", e))?;

    Ok(())
}
