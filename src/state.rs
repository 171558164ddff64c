use std::path::Path;

use crate::color::SeriesPalette;
use crate::config::AnalysisConfig;
use crate::data::analysis::GroundMotionAnalysis;
use crate::data::loader::{LoadError, load_record};
use crate::data::model::PeakSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Configuration the current analysis was computed with.
    pub config: AnalysisConfig,

    /// Loaded record and its derived series.
    pub analysis: GroundMotionAnalysis,

    /// Peak values of `analysis`, cached.
    pub summary: PeakSummary,

    /// Damping ratio being edited in the side panel.
    pub damping_input: f64,

    /// Colours of the three quantities.
    pub palette: SeriesPalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig, analysis: GroundMotionAnalysis) -> Self {
        let summary = analysis.summary();
        Self {
            damping_input: config.damping_ratio,
            config,
            analysis,
            summary,
            palette: SeriesPalette::default(),
            status_message: None,
        }
    }

    /// Replace the analysis with a freshly computed one.
    pub fn set_analysis(&mut self, analysis: GroundMotionAnalysis) {
        self.summary = analysis.summary();
        self.analysis = analysis;
        self.status_message = None;
    }

    /// Load another record and run it with the current configuration.
    /// On failure the current analysis is kept.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let record = load_record(path)?;
        self.config.record_path = path.to_path_buf();
        let analysis = GroundMotionAnalysis::run(record, &self.config);
        self.set_analysis(analysis);
        Ok(())
    }

    /// Recompute the spectrum with `damping_input`.
    pub fn apply_damping(&mut self) {
        if !self.damping_input.is_finite() || self.damping_input < 0.0 {
            self.status_message = Some(format!("Invalid damping ratio {}", self.damping_input));
            return;
        }
        self.config.damping_ratio = self.damping_input;
        let analysis = self.analysis.with_damping(self.damping_input, &self.config);
        self.set_analysis(analysis);
    }

    /// Whether the side panel holds an unapplied damping ratio.
    pub fn damping_changed(&self) -> bool {
        self.damping_input != self.config.damping_ratio
    }
}
