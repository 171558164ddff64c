use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// AccelerogramRecord – the loaded time series
// ---------------------------------------------------------------------------

/// A single-channel ground acceleration record on a uniform time base.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerogramRecord {
    /// Sampling interval Δt in seconds.
    pub dt: f64,
    /// Time stamps, `t_i = i · Δt`.
    pub time: Vec<f64>,
    /// Acceleration samples in m/s² – same length as `time`.
    pub acceleration: Vec<f64>,
}

impl AccelerogramRecord {
    /// Build a record from samples, deriving `t_i = i · Δt`.
    pub fn from_samples(dt: f64, acceleration: Vec<f64>) -> Self {
        let time = (0..acceleration.len()).map(|i| i as f64 * dt).collect();
        AccelerogramRecord {
            dt,
            time,
            acceleration,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.acceleration.len()
    }

    /// Time of the last sample.
    pub fn duration(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    /// Acceleration normalised by `gravity`, i.e. in units of g.
    pub fn acceleration_in_g(&self, gravity: f64) -> Vec<f64> {
        self.acceleration.iter().map(|a| a / gravity).collect()
    }
}

// ---------------------------------------------------------------------------
// MotionSeries – acceleration and its integrals
// ---------------------------------------------------------------------------

/// Acceleration, velocity and displacement aligned on the record time base.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSeries {
    pub acceleration: Vec<f64>,
    pub velocity: Vec<f64>,
    pub displacement: Vec<f64>,
}

// ---------------------------------------------------------------------------
// OscillatorBank – the SDOF systems the spectrum is evaluated on
// ---------------------------------------------------------------------------

/// Natural periods of the oscillators and their shared damping ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorBank {
    /// Natural periods in seconds, ascending.
    pub periods: Vec<f64>,
    /// Natural angular frequencies `ω = 2π / T` in rad/s.
    pub omegas: Vec<f64>,
    /// Damping ratio ζ shared by every oscillator.
    pub damping_ratio: f64,
}

impl OscillatorBank {
    pub fn new(periods: Vec<f64>, damping_ratio: f64) -> Self {
        let omegas = periods.iter().map(|&t| angular_frequency(t)).collect();
        OscillatorBank {
            periods,
            omegas,
            damping_ratio,
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }
}

/// Natural angular frequency of an oscillator with period `period` [s].
pub fn angular_frequency(period: f64) -> f64 {
    2.0 * PI / period
}

// ---------------------------------------------------------------------------
// ResponseSpectrum – peak responses per period
// ---------------------------------------------------------------------------

/// Pseudo-spectral ordinates, one entry per oscillator period.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpectrum {
    pub periods: Vec<f64>,
    pub damping_ratio: f64,
    /// Peak relative displacement.
    pub sd: Vec<f64>,
    /// Pseudo-velocity, `Sd · ω`.
    pub sv: Vec<f64>,
    /// Pseudo-acceleration, `Sd · ω²`.
    pub sa: Vec<f64>,
}

impl ResponseSpectrum {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Largest pseudo-acceleration and the period it occurs at.
    pub fn peak_sa(&self) -> Option<(f64, f64)> {
        self.periods
            .iter()
            .zip(&self.sa)
            .map(|(&t, &sa)| (t, sa))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

// ---------------------------------------------------------------------------
// PeakSummary – scalar intensity measures shown next to the figure
// ---------------------------------------------------------------------------

/// A peak absolute value and the time (or period) at which it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub at: f64,
    pub value: f64,
}

/// Peak ground motion values and the spectral peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakSummary {
    /// Peak ground acceleration in g.
    pub pga: Peak,
    /// Peak ground velocity in m/s.
    pub pgv: Peak,
    /// Peak ground displacement in m.
    pub pgd: Peak,
    /// Largest pseudo-acceleration; `at` is the period.
    pub peak_sa: Option<Peak>,
}

/// Largest absolute sample of `values` with its abscissa from `axis`.
pub fn abs_peak(axis: &[f64], values: &[f64]) -> Peak {
    axis.iter()
        .zip(values)
        .map(|(&at, &v)| Peak { at, value: v.abs() })
        .fold(Peak { at: 0.0, value: 0.0 }, |best, p| {
            if p.value > best.value { p } else { best }
        })
}
