use super::model::MotionSeries;

/// Integrate acceleration twice with a running sum (rectangular rule):
///
/// `v[i] = Δt · Σ_{k≤i} a[k]`, `d[i] = Δt · Σ_{k≤i} v[k]`
///
/// No baseline correction or detrending is applied.
pub fn integrate(acceleration: &[f64], dt: f64) -> MotionSeries {
    let velocity = cumulative_sum(acceleration, dt);
    let displacement = cumulative_sum(&velocity, dt);
    MotionSeries {
        acceleration: acceleration.to_vec(),
        velocity,
        displacement,
    }
}

/// Running sum of `values`, each partial sum scaled by `dt`.
fn cumulative_sum(values: &[f64], dt: f64) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc * dt)
        })
        .collect()
}
