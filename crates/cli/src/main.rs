use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

use labelplace::api::{
    candidate_index, draw_points_clustered, draw_points_uniform, fixed_corners,
    generate_candidates, place_labels, zoom_thresholds, ClusterCfg, CornerRule, Domain2, PlaceCfg,
    PointGrid, Rect, ReplayToken, StoreKind, ThresholdCfg, UniformCfg,
};

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Scatter generation, label placement, and zoom threshold search")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a synthetic scatter and write it as x,y rows
    Gen(GenArgs),
    /// Place square labels for a scatter at one zoom level
    Label(LabelArgs),
    /// Find the size at which each point's label first survives
    Thresholds(ThresholdArgs),
}

#[derive(Args, Serialize)]
struct GenArgs {
    #[arg(long, default_value_t = 1000)]
    count: usize,
    /// Window minimum, both axes
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    min: f64,
    /// Window maximum, both axes
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    max: f64,
    /// Number of cluster centers; 0 draws uniformly
    #[arg(long, default_value_t = 0)]
    clusters: usize,
    /// Cluster spread as a fraction of the window extent
    #[arg(long, default_value_t = 0.05)]
    spread: f64,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Serialize)]
struct LabelArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Uniform label side; overrides per-row side and corner hints
    #[arg(long)]
    size: Option<f64>,
    /// Let all four corners compete instead of pre-fixing one per point
    #[arg(long)]
    free: bool,
    #[arg(long, value_enum, default_value_t = StoreArg::Grid)]
    store: StoreArg,
}

#[derive(Args, Serialize)]
struct ThresholdArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Smallest probed size
    #[arg(long, default_value_t = 1e-4)]
    smin: f64,
    /// Largest probed size; 0 derives it from the scatter extent
    #[arg(long, default_value_t = 0.0)]
    smax: f64,
    /// Multiplicative step of the growth walk
    #[arg(long, default_value_t = 1.2)]
    growth: f64,
    #[arg(long, default_value_t = 56)]
    max_growth: u32,
    #[arg(long, default_value_t = 64)]
    max_refine: u32,
    /// Bracket tolerance as a fraction of the scatter extent
    #[arg(long, default_value_t = 6e-5)]
    eps_rel: f64,
    /// Sweep sample count; 0 picks one from the growth factor
    #[arg(long = "multi-sample", default_value_t = 0)]
    samples: u32,
    /// Skip the log-spaced sweep and rely on growth plus bisection
    #[arg(long = "no-multi")]
    no_multi: bool,
    #[arg(long, value_enum, default_value_t = StoreArg::Grid)]
    store: StoreArg,
}

#[derive(Clone, Copy, Debug, Serialize, ValueEnum)]
enum StoreArg {
    Grid,
    Quadtree,
}

impl From<StoreArg> for StoreKind {
    fn from(s: StoreArg) -> Self {
        match s {
            StoreArg::Grid => StoreKind::Grid,
            StoreArg::Quadtree => StoreKind::Quadtree,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Gen(args) => generate(args),
        Action::Label(args) => label(args),
        Action::Thresholds(args) => thresholds(args),
    }
}

fn generate(args: GenArgs) -> Result<()> {
    let domain = Domain2::square(args.min, args.max);
    let tok = ReplayToken {
        seed: args.seed,
        index: 0,
    };
    let points = if args.clusters == 0 {
        draw_points_uniform(
            UniformCfg {
                count: args.count,
                domain,
            },
            tok,
        )
    } else {
        draw_points_clustered(
            ClusterCfg {
                count: args.count,
                clusters: args.clusters,
                spread: args.spread,
                domain,
            },
            tok,
        )
    };
    io::write_points(&args.out, &points)?;
    tracing::info!(count = points.len(), out = %args.out.display(), "scatter written");
    provenance::write_sidecar(&args.out, serde_json::to_value(&args)?)?;
    Ok(())
}

fn label(args: LabelArgs) -> Result<()> {
    let t0 = Instant::now();
    let scatter = io::read_scatter(&args.input)?;
    let n = scatter.points.len();
    tracing::info!(points = n, input = %args.input.display(), "scatter loaded");

    if n == 0 {
        io::write_labels(&args.out, &[], &[], &[])?;
        provenance::write_sidecar(&args.out, serde_json::to_value(&args)?)?;
        return Ok(());
    }

    // With an explicit --size every hint is ignored; otherwise the side
    // column scales individual candidates and a corner column forces that
    // corner for its row.
    let mut candidates = match args.size {
        Some(s) => generate_candidates(&scatter.points, s),
        None => {
            let mut candidates = generate_candidates(&scatter.points, io::DEFAULT_SIDE);
            for (p, side) in scatter.side.iter().enumerate() {
                if let Some(s) = side {
                    for c in 0..4 {
                        candidates[p * 4 + c].size = *s;
                    }
                }
            }
            for (p, corner) in scatter.corner.iter().enumerate() {
                if let Some(c) = corner {
                    candidates[candidate_index(p, *c)].valid = true;
                }
            }
            candidates
        }
    };
    let pass_size = candidates
        .iter()
        .map(|c| c.size)
        .fold(f64::MIN_POSITIVE, f64::max);

    let cfg = PlaceCfg {
        store: args.store.into(),
        ..PlaceCfg::default()
    };
    let grid = PointGrid::build(&scatter.points, pass_size);
    let corners = fixed_corners(&scatter.points, &grid, cfg.eps_quadrant);
    let rule = if args.free {
        CornerRule::Free
    } else {
        CornerRule::Fixed(&corners)
    };
    let placed = place_labels(&scatter.points, &mut candidates, pass_size, rule, &cfg)?;

    tracing::info!(
        labeled = placed.len(),
        total = n,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "placement done"
    );
    io::write_labels(&args.out, &scatter.points, &candidates, &corners)?;
    provenance::write_sidecar(&args.out, serde_json::to_value(&args)?)?;
    Ok(())
}

fn thresholds(args: ThresholdArgs) -> Result<()> {
    let t0 = Instant::now();
    let scatter = io::read_scatter(&args.input)?;
    let points = scatter.points;
    let n = points.len();
    tracing::info!(points = n, input = %args.input.display(), "scatter loaded");

    let span = Rect::bounding(&points)
        .map(|b| b.width().max(b.height()))
        .filter(|s| *s > 0.0)
        .unwrap_or(1.0);
    let cfg = ThresholdCfg {
        smin: args.smin.max(1e-6),
        smax: if args.smax > 0.0 { args.smax } else { span },
        eps: span * args.eps_rel + 1e-6,
        growth: args.growth,
        max_growth: args.max_growth,
        max_refine: args.max_refine,
        samples: args.samples,
        multi_sample: !args.no_multi,
        place: PlaceCfg {
            store: args.store.into(),
            ..PlaceCfg::default()
        },
    };
    let res = zoom_thresholds(&points, &cfg)?;

    tracing::info!(
        labeled = res.labeled.iter().filter(|&&l| l).count(),
        total = n,
        sweep_runs = res.sweep_runs,
        growth_runs = res.growth_runs,
        refine_runs = res.refine_runs,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "threshold search done"
    );
    io::write_thresholds(&args.out, &points, &res)?;
    provenance::write_sidecar(&args.out, serde_json::to_value(&args)?)?;
    Ok(())
}
