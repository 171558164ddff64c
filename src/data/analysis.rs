use crate::config::{AnalysisConfig, Range};

use super::integrate::integrate;
use super::model::{AccelerogramRecord, MotionSeries, Peak, PeakSummary, ResponseSpectrum, abs_peak};
use super::spectrum::compute_response_spectrum;

/// One record carried through integration and the response spectrum.
#[derive(Debug, Clone)]
pub struct GroundMotionAnalysis {
    pub record: AccelerogramRecord,
    /// Integrated motion, in the units of the record (m/s², m/s, m).
    pub motion: MotionSeries,
    /// Record acceleration divided by gravity.
    pub acceleration_g: Vec<f64>,
    pub spectrum: ResponseSpectrum,
}

impl GroundMotionAnalysis {
    pub fn run(record: AccelerogramRecord, config: &AnalysisConfig) -> Self {
        let motion = integrate(&record.acceleration, record.dt);
        let acceleration_g = record.acceleration_in_g(config.gravity);
        let spectrum = compute_response_spectrum(&config.oscillator_bank(), &acceleration_g, record.dt);

        if let Some(fit) = time_axis_fit(record.duration(), record.dt, config.axes.time) {
            log::warn!(
                "record lasts {:.2} s, {fit} than the plotted time range {:.2}..{:.2} s",
                record.duration(),
                config.axes.time.min,
                config.axes.time.max
            );
        }

        GroundMotionAnalysis {
            record,
            motion,
            acceleration_g,
            spectrum,
        }
    }

    /// Re-run only the spectrum with another damping ratio.
    pub fn with_damping(&self, damping_ratio: f64, config: &AnalysisConfig) -> Self {
        let mut bank = config.oscillator_bank();
        bank.damping_ratio = damping_ratio;
        let spectrum = compute_response_spectrum(&bank, &self.acceleration_g, self.record.dt);
        GroundMotionAnalysis {
            spectrum,
            ..self.clone()
        }
    }

    pub fn summary(&self) -> PeakSummary {
        let time = &self.record.time;
        PeakSummary {
            pga: abs_peak(time, &self.acceleration_g),
            pgv: abs_peak(time, &self.motion.velocity),
            pgd: abs_peak(time, &self.motion.displacement),
            peak_sa: self.spectrum.peak_sa().map(|(at, value)| Peak { at, value }),
        }
    }
}

/// `"longer"` or `"shorter"` when the record end misses the end of the time
/// axis by more than one sample interval.
fn time_axis_fit(duration: f64, dt: f64, axis: Range) -> Option<&'static str> {
    if duration > axis.max + dt {
        Some("longer")
    } else if duration < axis.max - dt {
        Some("shorter")
    } else {
        None
    }
}
