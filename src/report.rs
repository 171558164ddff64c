use std::fmt::Write;

use crate::data::analysis::GroundMotionAnalysis;
use crate::data::model::abs_peak;

/// Plain-text summary and spectrum table for `--headless` runs.
pub fn render(analysis: &GroundMotionAnalysis) -> String {
    let record = &analysis.record;
    let summary = analysis.summary();
    let spectrum = &analysis.spectrum;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} samples, dt = {} s, duration {:.2} s",
        record.len(),
        record.dt,
        record.duration()
    );
    let pga_si = abs_peak(&record.time, &analysis.motion.acceleration);
    let _ = writeln!(
        out,
        "PGA {:>12.6} g    @ {:.2} s  ({:.4} m/s²)",
        summary.pga.value, summary.pga.at, pga_si.value
    );
    let _ = writeln!(out, "PGV {:>12.6} m/s  @ {:.2} s", summary.pgv.value, summary.pgv.at);
    let _ = writeln!(out, "PGD {:>12.6} m    @ {:.2} s", summary.pgd.value, summary.pgd.at);
    let _ = writeln!(out);
    let _ = writeln!(out, "damping ratio {}", spectrum.damping_ratio);
    let _ = writeln!(
        out,
        "{:>10} {:>14} {:>14} {:>14}",
        "T (s)", "Sd", "Sv", "Sa (g)"
    );
    for i in 0..spectrum.len() {
        let _ = writeln!(
            out,
            "{:>10.4} {:>14.6e} {:>14.6e} {:>14.6e}",
            spectrum.periods[i], spectrum.sd[i], spectrum.sv[i], spectrum.sa[i]
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::model::AccelerogramRecord;

    #[test]
    fn one_row_per_period() {
        let config = AnalysisConfig {
            periods: vec![0.1, 0.2, 0.4],
            ..AnalysisConfig::default()
        };
        let record = AccelerogramRecord::from_samples(0.01, vec![0.0, 1.0, -1.0, 0.5]);
        let text = render(&GroundMotionAnalysis::run(record, &config));

        assert!(text.starts_with("4 samples, dt = 0.01 s"));
        assert!(text.contains("damping ratio 0.05"));
        let rows = text.lines().skip_while(|l| !l.contains("T (s)")).skip(1);
        assert_eq!(rows.count(), 3);
    }
}
