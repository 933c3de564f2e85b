//! Print the labeled fraction as a function of label size, measured by
//! direct placement runs and predicted from the per-point visibility
//! thresholds.
//!
//! Usage:
//!   cargo run -p labelplace --example coverage_curve
//!   cargo run -p labelplace --example coverage_curve -- 1500
//!
//! The two columns agree wherever the thresholds resolved tightly; the
//! prediction is conservative, so it may lag the measurement by a point or
//! two near a bracket edge.

use labelplace::scatter::{draw_points_uniform, Domain2, ReplayToken, UniformCfg};
use labelplace::threshold::{run_at_scale, zoom_thresholds, ThresholdCfg};

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(800);
    let points = draw_points_uniform(
        UniformCfg {
            count,
            domain: Domain2::square(-1.0, 1.0),
        },
        ReplayToken { seed: 7, index: 0 },
    );

    let cfg = ThresholdCfg {
        smin: 2e-3,
        smax: 0.4,
        eps: 1e-3,
        ..ThresholdCfg::default()
    };
    let res = zoom_thresholds(&points, &cfg).unwrap();
    println!(
        "search probes: sweep {} growth {} refine {}",
        res.sweep_runs, res.growth_runs, res.refine_runs
    );

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let size = cfg.smin * (cfg.smax / cfg.smin).powf(t);
        let run = run_at_scale(&points, size, &cfg.place).unwrap();
        let measured = run.alive.iter().filter(|&&a| a).count();
        let predicted = res
            .size
            .iter()
            .zip(&res.labeled)
            .filter(|&(s, &l)| l && *s >= size)
            .count();
        println!(
            "size {size:.4}: measured {measured:4} predicted {predicted:4} of {}",
            points.len()
        );
    }
}
