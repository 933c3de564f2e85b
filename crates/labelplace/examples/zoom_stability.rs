//! Walk a zoom schedule through the monotone state machine and print how
//! many labels stay active at each step.
//!
//! Usage:
//!   cargo run -p labelplace --example zoom_stability
//!   cargo run -p labelplace --example zoom_stability -- 2000
//!
//! The schedule shrinks the label size step by step (zooming out) and then
//! grows it back (zooming in). On the way out the active count only rises;
//! on the way back it only falls, and no label ever flickers.

use labelplace::geom::generate_candidates;
use labelplace::place::{place_labels_monotone, MonotoneState, PlaceCfg};
use labelplace::scatter::{draw_points_clustered, ClusterCfg, Domain2, ReplayToken};

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000);
    let points = draw_points_clustered(
        ClusterCfg {
            count,
            clusters: 10,
            spread: 0.08,
            domain: Domain2::square(-1.0, 1.0),
        },
        ReplayToken {
            seed: 2025,
            index: 0,
        },
    );

    let sizes_out: Vec<f64> = (0..8).map(|i| 0.08 * 0.75f64.powi(i)).collect();
    let schedule: Vec<f64> = sizes_out
        .iter()
        .copied()
        .chain(sizes_out.iter().rev().copied())
        .collect();

    let cfg = PlaceCfg::default();
    let mut state = MonotoneState::new();
    let mut candidates = generate_candidates(&points, sizes_out[0]);
    for (step, &size) in schedule.iter().enumerate() {
        let placed =
            place_labels_monotone(&points, &mut candidates, size, &mut state, &cfg).unwrap();
        println!(
            "step {step:2}: size {size:.5} -> {:4} active labels",
            placed.len()
        );
    }
    let seen = state.labeled_once.iter().filter(|&&l| l).count();
    println!("{seen} of {} points were labeled at least once", points.len());
}
