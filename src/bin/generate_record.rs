use std::f64::consts::TAU;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Same layout as the strong-motion files the viewer reads.
const SAMPLE_COUNT: usize = 1700;
const DT: f64 = 0.01;

/// Seeded Gaussian noise for the record's stochastic part.
///
/// SplitMix64 drives a polar Box-Muller pair; the second deviate of each
/// pair is kept for the next call.
struct GroundNoise {
    seed: u64,
    spare: Option<f64>,
}

impl GroundNoise {
    fn new(seed: u64) -> Self {
        GroundNoise { seed, spare: None }
    }

    fn uniform(&mut self) -> f64 {
        self.seed = self.seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Phase in `[0, 2π)`.
    fn phase(&mut self) -> f64 {
        self.uniform() * TAU
    }

    /// Zero-mean normal deviate with standard deviation `sigma` [m/s²].
    fn normal(&mut self, sigma: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return sigma * z;
        }
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let r2 = u * u + v * v;
            if r2 > 0.0 && r2 < 1.0 {
                let k = (-2.0 * r2.ln() / r2).sqrt();
                self.spare = Some(v * k);
                return sigma * u * k;
            }
        }
    }
}

/// Saragoni–Hart style envelope: quick build-up, exponential coda.
fn envelope(t: f64) -> f64 {
    let (rise, peak_at) = (2.5, 3.0);
    if t < peak_at {
        (t / peak_at).powf(rise)
    } else {
        (-(t - peak_at) / 2.5).exp()
    }
}

fn main() -> std::io::Result<()> {
    let mut noise = GroundNoise::new(42);

    // Dominant frequencies [Hz] and amplitudes [m/s²]
    let components = [(1.5, 0.6), (3.2, 1.0), (5.7, 0.7), (9.0, 0.3)];
    let phases: Vec<f64> = components
        .iter()
        .map(|_| noise.phase())
        .collect();

    let acceleration: Vec<f64> = (0..SAMPLE_COUNT)
        .map(|i| {
            let t = i as f64 * DT;
            let harmonic: f64 = components
                .iter()
                .zip(&phases)
                .map(|(&(f, amp), &phi)| amp * (TAU * f * t + phi).sin())
                .sum();
            envelope(t) * (harmonic + noise.normal(0.3))
        })
        .collect();

    let output_path = "synthetic_record.ACC";
    let mut out = BufWriter::new(File::create(output_path)?);
    writeln!(out, "SYNTHETIC N-S ACCELEROGRAM (m/s/s)")?;
    writeln!(out, "{SAMPLE_COUNT} {DT}")?;
    for a in &acceleration {
        writeln!(out, "{a:.6e}")?;
    }
    out.flush()?;

    let pga = acceleration.iter().fold(0.0f64, |m, a| m.max(a.abs()));
    println!(
        "Wrote {SAMPLE_COUNT} samples (dt = {DT} s, PGA = {:.3} g) to {output_path}",
        pga / 9.81
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_reproducible_for_a_seed() {
        let mut a = GroundNoise::new(7);
        let mut b = GroundNoise::new(7);
        for _ in 0..100 {
            assert_eq!(a.normal(1.0), b.normal(1.0));
        }
    }

    #[test]
    fn noise_has_requested_spread() {
        let mut noise = GroundNoise::new(42);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| noise.normal(0.3)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.01, "mean {mean}");
        assert!((var.sqrt() - 0.3).abs() < 0.01, "std {}", var.sqrt());
    }

    #[test]
    fn envelope_rises_then_decays() {
        assert_eq!(envelope(0.0), 0.0);
        assert!((envelope(3.0) - 1.0).abs() < 1e-12);
        assert!(envelope(1.5) < envelope(2.5));
        assert!(envelope(10.0) < envelope(5.0));
    }
}
