use std::time::Instant;

use nalgebra::{Matrix2, Vector2};

use super::model::{OscillatorBank, ResponseSpectrum, angular_frequency};

/// Below this distance from ζ = 1 the oscillator is treated as critically damped.
const CRITICAL_DAMPING_BAND: f64 = 1e-8;

// ---------------------------------------------------------------------------
// Discrete-time SDOF oscillator
// ---------------------------------------------------------------------------

/// `x'' + 2ζω x' + ω² x = u(t)` discretised on a step `h`, with the input
/// held piecewise linear between samples (first-order hold).
///
/// State is `[x, x']`; the update is exact at the sample instants:
///
/// `s[k+1] = Φ s[k] + γ_prev u[k] + γ_next u[k+1]`
#[derive(Debug, Clone, Copy)]
struct DiscreteOscillator {
    phi: Matrix2<f64>,
    gamma_prev: Vector2<f64>,
    gamma_next: Vector2<f64>,
}

impl DiscreteOscillator {
    fn new(omega: f64, zeta: f64, h: f64) -> Self {
        let phi = transition_matrix(omega, zeta, h);

        // A⁻¹ for A = [[0, 1], [-ω², -2ζω]]
        let w2 = omega * omega;
        let a_inv = Matrix2::new(-2.0 * zeta * omega, -1.0, w2, 0.0) / w2;
        let b = Vector2::new(0.0, 1.0);

        // Γ₀ = ∫₀ʰ e^{As} ds,  Γ₁ = ∫₀ʰ e^{As} s ds
        let gamma0 = a_inv * (phi - Matrix2::identity());
        let gamma1 = a_inv * (phi * h - gamma0);

        let gamma_prev = gamma1 * b / h;
        let gamma_next = gamma0 * b - gamma_prev;
        DiscreteOscillator {
            phi,
            gamma_prev,
            gamma_next,
        }
    }

    fn step(&self, state: Vector2<f64>, u_prev: f64, u_next: f64) -> Vector2<f64> {
        self.phi * state + self.gamma_prev * u_prev + self.gamma_next * u_next
    }
}

/// Closed-form `e^{Ah}` of the free oscillator for every damping regime.
fn transition_matrix(omega: f64, zeta: f64, h: f64) -> Matrix2<f64> {
    let decay = zeta * omega;
    if (zeta - 1.0).abs() < CRITICAL_DAMPING_BAND {
        let e = (-omega * h).exp();
        Matrix2::new(
            e * (1.0 + omega * h),
            e * h,
            -e * omega * omega * h,
            e * (1.0 - omega * h),
        )
    } else if zeta < 1.0 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let e = (-decay * h).exp();
        let (s, c) = (wd * h).sin_cos();
        Matrix2::new(
            e * (c + decay / wd * s),
            e * s / wd,
            -e * omega * omega / wd * s,
            e * (c - decay / wd * s),
        )
    } else {
        // cosh/sinh expanded into the two real modes so large arguments do not overflow
        let mu = omega * (zeta * zeta - 1.0).sqrt();
        let slow = ((-decay + mu) * h).exp();
        let fast = ((-decay - mu) * h).exp();
        let ch = 0.5 * (slow + fast);
        let sh = 0.5 * (slow - fast);
        Matrix2::new(
            ch + decay / mu * sh,
            sh / mu,
            -omega * omega / mu * sh,
            ch - decay / mu * sh,
        )
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Relative displacement history of a damped SDOF oscillator of natural
/// period `period` [s] driven by `input`, sampled every `dt` seconds,
/// starting from rest.
///
/// The transfer function from input to output is `1 / (s² + 2ζωs + ω²)`.
pub fn simulate_oscillator(period: f64, damping_ratio: f64, input: &[f64], dt: f64) -> Vec<f64> {
    let Some(&u0) = input.first() else {
        return Vec::new();
    };
    let oscillator = DiscreteOscillator::new(angular_frequency(period), damping_ratio, dt);

    let mut response = Vec::with_capacity(input.len());
    let mut state = Vector2::<f64>::zeros();
    response.push(state.x);

    let mut u_prev = u0;
    for &u_next in &input[1..] {
        state = oscillator.step(state, u_prev, u_next);
        response.push(state.x);
        u_prev = u_next;
    }
    response
}

/// Peak absolute relative displacement of one oscillator, `max |x(t)|`.
pub fn peak_response(period: f64, damping_ratio: f64, input: &[f64], dt: f64) -> f64 {
    simulate_oscillator(period, damping_ratio, input, dt)
        .into_iter()
        .fold(0.0f64, |peak, x| peak.max(x.abs()))
}

/// Evaluate the pseudo-spectral ordinates of every oscillator in `bank` for
/// the ground acceleration `input_g` (in g) sampled every `dt` seconds.
///
/// Oscillators are uncoupled and are run one after the other; the output
/// keeps the period order of the bank.
pub fn compute_response_spectrum(bank: &OscillatorBank, input_g: &[f64], dt: f64) -> ResponseSpectrum {
    let now = Instant::now();
    let zeta = bank.damping_ratio;

    let mut sd = Vec::with_capacity(bank.len());
    let mut sv = Vec::with_capacity(bank.len());
    let mut sa = Vec::with_capacity(bank.len());

    for (&period, &omega) in bank.periods.iter().zip(&bank.omegas) {
        let peak = peak_response(period, zeta, input_g, dt);
        log::debug!("T = {period:>8.4} s  Sd = {peak:.6e}");
        sd.push(peak);
        sv.push(peak * omega);
        sa.push(peak * omega * omega);
    }

    log::info!(
        "Response spectrum: {} periods at zeta = {zeta} in {}ms",
        bank.len(),
        now.elapsed().as_millis()
    );

    ResponseSpectrum {
        periods: bank.periods.clone(),
        damping_ratio: zeta,
        sd,
        sv,
        sa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Analytic response of an underdamped oscillator to a unit step applied at t = 0.
    fn step_response(omega: f64, zeta: f64, t: f64) -> f64 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * omega * t).exp();
        (1.0 - e * ((wd * t).cos() + zeta * omega / wd * (wd * t).sin())) / (omega * omega)
    }

    /// Analytic response of an underdamped oscillator at rest to the ramp `u(t) = t`.
    fn ramp_response(omega: f64, zeta: f64, t: f64) -> f64 {
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let w2 = omega * omega;
        let w3 = w2 * omega;
        let e = (-zeta * omega * t).exp();
        t / w2 - 2.0 * zeta / w3
            + e * (2.0 * zeta / w3 * (wd * t).cos() + (2.0 * zeta * zeta - 1.0) / (w2 * wd) * (wd * t).sin())
    }

    fn ground_motion(n: usize, dt: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                let envelope = (t / 2.0).min(1.0) * (-(t - 2.0).max(0.0) / 3.0).exp();
                envelope * (0.3 * (7.0 * t).sin() + 0.2 * (17.0 * t).cos() + 0.1 * (29.0 * t).sin())
            })
            .collect()
    }

    #[test]
    fn step_response_matches_analytic_solution() {
        let (period, zeta, dt) = (0.8, 0.05, 0.01);
        let omega = angular_frequency(period);
        let input = vec![1.0; 1000];
        let response = simulate_oscillator(period, zeta, &input, dt);

        assert_eq!(response.len(), input.len());
        assert_eq!(response[0], 0.0);
        let scale = 1.0 / (omega * omega);
        for (i, &x) in response.iter().enumerate() {
            let exact = step_response(omega, zeta, i as f64 * dt);
            assert!(
                (x - exact).abs() < 1e-9 * scale,
                "sample {i}: {x} vs {exact}"
            );
        }
    }

    #[test]
    fn ramp_response_matches_analytic_solution() {
        let (period, zeta, dt) = (0.5, 0.05, 0.02);
        let omega = angular_frequency(period);
        let input: Vec<f64> = (0..300).map(|i| i as f64 * dt).collect();
        let response = simulate_oscillator(period, zeta, &input, dt);

        let scale = 1.0 / (omega * omega);
        for (i, &x) in response.iter().enumerate() {
            let exact = ramp_response(omega, zeta, i as f64 * dt);
            assert!(
                (x - exact).abs() < 1e-9 * scale,
                "sample {i}: {x} vs {exact}"
            );
        }
    }

    #[test]
    fn delayed_input_delays_response() {
        let dt = 0.01;
        let input = ground_motion(400, dt);
        let mut delayed = vec![0.0];
        delayed.extend_from_slice(&input[..input.len() - 1]);

        // ground_motion starts at zero, so the delayed record is the same
        // signal shifted by one sample
        let base = simulate_oscillator(0.3, 0.05, &input, dt);
        let shifted = simulate_oscillator(0.3, 0.05, &delayed, dt);
        assert_eq!(shifted[0], 0.0);
        let scale = base.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        for i in 1..base.len() {
            assert!((shifted[i] - base[i - 1]).abs() < 1e-12 * scale.max(1e-30));
        }
        assert!(base.iter().zip(&shifted).any(|(a, b)| (a - b).abs() > 1e-3 * scale));
    }

    #[test]
    fn undamped_step_peaks_at_twice_static_deflection() {
        let period = 1.0;
        let omega = angular_frequency(period);
        // half period = 0.5 s falls exactly on a sample
        let peak = peak_response(period, 0.0, &vec![1.0; 400], 0.005);
        assert!((peak * omega * omega - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_input_gives_zero_spectrum() {
        let bank = OscillatorBank::new(vec![0.05, 0.5, 2.0], 0.05);
        let spectrum = compute_response_spectrum(&bank, &[0.0; 300], 0.01);
        assert!(spectrum.sd.iter().all(|&v| v == 0.0));
        assert!(spectrum.sa.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn pseudo_ordinates_follow_from_sd() {
        let periods = vec![0.0001, 0.001, 0.01, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0];
        let bank = OscillatorBank::new(periods.clone(), 0.05);
        let spectrum = compute_response_spectrum(&bank, &ground_motion(1500, 0.01), 0.01);

        assert_eq!(spectrum.periods, periods);
        assert_eq!(spectrum.len(), periods.len());
        for j in 0..spectrum.len() {
            let omega = bank.omegas[j];
            assert_eq!(spectrum.sv[j], spectrum.sd[j] * omega);
            assert_eq!(spectrum.sa[j], spectrum.sd[j] * omega * omega);
            assert!(spectrum.sd[j].is_finite());
        }
    }

    #[test]
    fn rigid_oscillator_follows_ground_acceleration() {
        let dt = 0.01;
        let input = ground_motion(1500, dt);
        let pga = input.iter().fold(0.0f64, |m, v| m.max(v.abs()));

        let bank = OscillatorBank::new(vec![0.0001, 0.001], 0.05);
        let spectrum = compute_response_spectrum(&bank, &input, dt);
        for &sa in &spectrum.sa {
            assert!((sa - pga).abs() < 1e-3 * pga, "Sa {sa} vs PGA {pga}");
        }
    }

    #[test]
    fn peak_does_not_grow_with_damping() {
        let input = vec![1.0; 2000];
        let dampings = [0.0, 0.02, 0.05, 0.1, 0.2, 0.5, 0.8, 0.95, 1.0, 1.5, 3.0];
        let peaks: Vec<f64> = dampings
            .iter()
            .map(|&zeta| peak_response(1.0, zeta, &input, 0.005))
            .collect();

        for (pair, zetas) in peaks.windows(2).zip(dampings.windows(2)) {
            assert!(
                pair[1] <= pair[0] * (1.0 + 1e-9),
                "peak rose from {} (zeta {}) to {} (zeta {})",
                pair[0],
                zetas[0],
                pair[1],
                zetas[1]
            );
        }
    }

    #[test]
    fn damping_regimes_agree_near_critical() {
        let input = ground_motion(800, 0.01);
        let below = simulate_oscillator(0.3, 1.0 - 1e-6, &input, 0.01);
        let at = simulate_oscillator(0.3, 1.0, &input, 0.01);
        let above = simulate_oscillator(0.3, 1.0 + 1e-6, &input, 0.01);
        let scale = at.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        for i in 0..at.len() {
            assert!((below[i] - at[i]).abs() < 1e-4 * scale);
            assert!((above[i] - at[i]).abs() < 1e-4 * scale);
        }
    }

    #[test]
    fn empty_and_single_sample_inputs() {
        assert!(simulate_oscillator(0.5, 0.05, &[], 0.01).is_empty());
        assert_eq!(simulate_oscillator(0.5, 0.05, &[0.3], 0.01), vec![0.0]);
        assert_eq!(peak_response(0.5, 0.05, &[0.3], 0.01), 0.0);
    }
}
