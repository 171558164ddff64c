use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;

use crate::data::model::OscillatorBank;

/// Natural periods [s] the response spectrum is evaluated at, dense at short periods.
pub const DEFAULT_PERIODS: [f64; 86] = [
    0.0001, 0.0002, 0.0003, 0.0004, 0.0005, 0.0006, 0.0007, 0.0008, 0.0009,
    0.001, 0.002, 0.003, 0.004, 0.005, 0.006, 0.007, 0.008, 0.009,
    0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08, 0.09,
    0.1, 0.12, 0.14, 0.16, 0.18, 0.2, 0.22, 0.24, 0.26, 0.28, 0.3, 0.32, 0.34, 0.36, 0.38, 0.4,
    0.42, 0.44, 0.46, 0.48, 0.5, 0.52, 0.54, 0.56, 0.58, 0.6, 0.62, 0.64, 0.66, 0.68, 0.7,
    0.72, 0.74, 0.76, 0.78, 0.8, 0.82, 0.84, 0.86, 0.88, 0.9, 0.92, 0.94, 0.96, 0.98,
    1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9,
    2.0, 3.0, 4.0, 5.0,
];

pub const DEFAULT_RECORD_PATH: &str = "GyeongJuMKL_NS_FLAC.ACC";
pub const DEFAULT_DAMPING_RATIO: f64 = 0.05;
pub const DEFAULT_GRAVITY: f64 = 9.81;

// ---------------------------------------------------------------------------
// Axis ranges
// ---------------------------------------------------------------------------

/// A closed plotting interval.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }
}

/// Default bounds of the six panels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisRanges {
    /// Time axis of the left column [s].
    pub time: Range,
    /// Ground acceleration [g].
    pub acceleration: Range,
    /// Ground velocity [m/s].
    pub velocity: Range,
    /// Ground displacement [m].
    pub displacement: Range,
    /// Period axis of the right column [s].
    pub period: Range,
    pub sa: Range,
    pub sv: Range,
    pub sd: Range,
}

impl Default for AxisRanges {
    fn default() -> Self {
        Self {
            time: Range::new(0.0, 16.0),
            acceleration: Range::new(-0.4, 0.4),
            velocity: Range::new(-0.1, 0.1),
            displacement: Range::new(-0.01, 0.01),
            period: Range::new(0.0, 2.0),
            sa: Range::new(0.0, 1.0),
            sv: Range::new(0.0, 0.02),
            sd: Range::new(0.0, 0.002),
        }
    }
}

impl AxisRanges {
    fn named(&self) -> [(&'static str, Range); 8] {
        [
            ("time", self.time),
            ("acceleration", self.acceleration),
            ("velocity", self.velocity),
            ("displacement", self.displacement),
            ("period", self.period),
            ("sa", self.sa),
            ("sv", self.sv),
            ("sd", self.sd),
        ]
    }
}

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// Everything the loader, the spectrum engine and the renderer are tuned by.
///
/// Every field may be omitted from a JSON file and falls back to its default:
///
/// ```json
/// {
///   "record_path": "GyeongJuMKL_NS_FLAC.ACC",
///   "damping_ratio": 0.05,
///   "gravity": 9.81,
///   "periods": [0.1, 0.2, 0.5, 1.0, 2.0],
///   "axes": { "time": { "min": 0.0, "max": 30.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub record_path: PathBuf,
    pub damping_ratio: f64,
    /// Acceleration of gravity used to express the record in g [m/s²].
    pub gravity: f64,
    pub periods: Vec<f64>,
    pub axes: AxisRanges,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            damping_ratio: DEFAULT_DAMPING_RATIO,
            gravity: DEFAULT_GRAVITY,
            periods: DEFAULT_PERIODS.to_vec(),
            axes: AxisRanges::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(text).context("parsing configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the physical and plotting constraints.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.damping_ratio.is_finite() && self.damping_ratio >= 0.0,
            "damping ratio must be finite and non-negative, got {}",
            self.damping_ratio
        );
        ensure!(
            self.gravity.is_finite() && self.gravity > 0.0,
            "gravity must be finite and positive, got {}",
            self.gravity
        );
        ensure!(!self.periods.is_empty(), "period list is empty");
        for (i, &t) in self.periods.iter().enumerate() {
            if !t.is_finite() || t <= 0.0 {
                bail!("period #{i} must be finite and positive, got {t}");
            }
        }
        if let Some(i) = self.periods.windows(2).position(|w| w[1] <= w[0]) {
            bail!(
                "periods must be strictly ascending: {} is followed by {}",
                self.periods[i],
                self.periods[i + 1]
            );
        }
        for (name, range) in self.axes.named() {
            ensure!(
                range.min < range.max,
                "axis '{name}' has min {} >= max {}",
                range.min,
                range.max
            );
        }
        Ok(())
    }

    pub fn oscillator_bank(&self) -> OscillatorBank {
        OscillatorBank::new(self.periods.clone(), self.damping_ratio)
    }
}
