//! Random point scatters (uniform and clustered, replay tokens).
//!
//! Purpose
//! - Deterministic samplers for the point sets consumed by placement and
//!   threshold runs, used by tests, benches, and the CLI generator. Every
//!   draw is parameterized by a small cfg plus a replay token, so a draw can
//!   be reproduced from `(seed, index)` alone.
//!
//! Model
//! - Uniform draws fill an axis-aligned window independently per coordinate.
//! - Clustered draws place cluster centers uniformly, then scatter points
//!   around them round-robin with Gaussian jitter, clamped to the window.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Axis-aligned sampling window.
#[derive(Clone, Copy, Debug)]
pub struct Domain2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Domain2 {
    /// The square window `[lo, hi]^2`.
    pub fn square(lo: f64, hi: f64) -> Self {
        Self {
            min: Vector2::new(lo, lo),
            max: Vector2::new(hi, hi),
        }
    }

    /// Swap reversed bounds per axis.
    fn ordered(self) -> Self {
        let (xmin, xmax) = if self.min.x <= self.max.x {
            (self.min.x, self.max.x)
        } else {
            (self.max.x, self.min.x)
        };
        let (ymin, ymax) = if self.min.y <= self.max.y {
            (self.min.y, self.max.y)
        } else {
            (self.max.y, self.min.y)
        };
        Self {
            min: Vector2::new(xmin, ymin),
            max: Vector2::new(xmax, ymax),
        }
    }
}

impl Default for Domain2 {
    fn default() -> Self {
        Self::square(-1.0, 1.0)
    }
}

/// Uniform scatter configuration.
#[derive(Clone, Copy, Debug)]
pub struct UniformCfg {
    pub count: usize,
    pub domain: Domain2,
}

impl Default for UniformCfg {
    fn default() -> Self {
        Self {
            count: 256,
            domain: Domain2::default(),
        }
    }
}

/// Clustered scatter configuration.
#[derive(Clone, Copy, Debug)]
pub struct ClusterCfg {
    pub count: usize,
    /// Cluster centers drawn uniformly in the window. At least 1.
    pub clusters: usize,
    /// Gaussian spread around a center, as a fraction of the window's larger
    /// extent. Negative values are treated as 0.
    pub spread: f64,
    pub domain: Domain2,
}

impl Default for ClusterCfg {
    fn default() -> Self {
        Self {
            count: 256,
            clusters: 8,
            spread: 0.05,
            domain: Domain2::default(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` points uniformly in the window.
pub fn draw_points_uniform(cfg: UniformCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let d = cfg.domain.ordered();
    (0..cfg.count).map(|_| uniform_in(&mut rng, d)).collect()
}

/// Draw `cfg.count` points around `cfg.clusters` uniform centers, assigned
/// round-robin, with Gaussian jitter clamped back into the window.
pub fn draw_points_clustered(cfg: ClusterCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let d = cfg.domain.ordered();
    let clusters = cfg.clusters.max(1);
    let centers: Vec<Vector2<f64>> = (0..clusters).map(|_| uniform_in(&mut rng, d)).collect();
    let extent = (d.max.x - d.min.x).max(d.max.y - d.min.y);
    let sigma = cfg.spread.max(0.0) * extent;
    (0..cfg.count)
        .map(|i| {
            let c = centers[i % clusters];
            let (gx, gy) = gauss_pair(&mut rng);
            Vector2::new(
                (c.x + gx * sigma).clamp(d.min.x, d.max.x),
                (c.y + gy * sigma).clamp(d.min.y, d.max.y),
            )
        })
        .collect()
}

fn uniform_in<R: Rng>(rng: &mut R, d: Domain2) -> Vector2<f64> {
    let x = if d.min.x < d.max.x {
        rng.gen_range(d.min.x..d.max.x)
    } else {
        d.min.x
    };
    let y = if d.min.y < d.max.y {
        rng.gen_range(d.min.y..d.max.y)
    } else {
        d.min.y
    };
    Vector2::new(x, y)
}

/// Box-Muller transform; one draw yields both coordinates.
fn gauss_pair<R: Rng>(rng: &mut R) -> (f64, f64) {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    let r = (-2.0 * u1.ln()).sqrt();
    let th = 2.0 * std::f64::consts::PI * u2;
    (r * th.cos(), r * th.sin())
}
