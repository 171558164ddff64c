mod app;
mod cli;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::Context;
use app::SpectrumViewerApp;
use clap::Parser;
use cli::Cli;
use data::analysis::GroundMotionAnalysis;
use data::loader::load_record;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let config = args.analysis_config()?;

    let record = load_record(&config.record_path)
        .with_context(|| format!("loading {}", config.record_path.display()))?;
    let analysis = GroundMotionAnalysis::run(record, &config);

    if args.headless {
        print!("{}", report::render(&analysis));
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config, analysis);
    eframe::run_native(
        "Ground Motion – Response Spectrum",
        options,
        Box::new(move |_cc| Ok(Box::new(SpectrumViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("figure window failed: {e}"))
}
