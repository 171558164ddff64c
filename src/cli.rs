//! Command line interface

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::AnalysisConfig;

/// Ground motion integration and elastic response spectrum viewer
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Accelerogram file, fixed-width text or .csv (defaults to the configured record)
    pub record: Option<PathBuf>,
    /// JSON analysis configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Oscillator damping ratio
    #[arg(short = 'z', long)]
    pub damping_ratio: Option<f64>,
    /// Acceleration of gravity used to express the record in g \[m/s²\]
    #[arg(long)]
    pub gravity: Option<f64>,
    /// Print the peak summary and the spectrum instead of opening the figure window
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Defaults, overridden by the JSON configuration, overridden by the flags
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(path) = &self.record {
            config.record_path = path.clone();
        }
        if let Some(zeta) = self.damping_ratio {
            config.damping_ratio = zeta;
        }
        if let Some(g) = self.gravity {
            config.gravity = g;
        }
        config.validate()?;
        Ok(config)
    }
}
