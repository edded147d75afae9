use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ringroad::{reference_instance, Aggregation, ProblemInstance, RingCfg, SolveError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

#[derive(Parser)]
#[command(name = "ringroad")]
#[command(about = "Emergency-service placement on ring roads")]
struct Cmd {
    /// Tie tolerance for threshold comparisons
    #[arg(long = "eps", global = true, default_value = "1e-9", value_parser = parse_eps)]
    cfg: RingCfg,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the reference instance: no threshold, alpha=8, alpha=5
    Demo,
    /// Solve an instance and write the placement (plus provenance) as JSON
    Solve {
        #[command(flatten)]
        source: Source,
        /// Threshold; defaults to the minimum achievable one
        #[arg(long)]
        alpha: Option<f64>,
        #[arg(long, value_enum, default_value_t = Strategy::Mean)]
        strategy: Strategy,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the minimum threshold and the caller that sets it
    Threshold {
        #[command(flatten)]
        source: Source,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Instance source: a JSON file, or CSV matrices plus circumferences.
#[derive(Args)]
struct Source {
    #[arg(long, conflicts_with_all = ["a", "b"])]
    input: Option<PathBuf>,
    /// Headerless CSV, callers x rings, distances to access point A
    #[arg(long, requires = "b")]
    a: Option<PathBuf>,
    /// Headerless CSV, callers x rings, distances to access point B
    #[arg(long, requires = "a")]
    b: Option<PathBuf>,
    /// Ring circumferences (comma separated), used with --a/--b
    #[arg(long, value_delimiter = ',', requires = "a")]
    d: Vec<f64>,
}

fn parse_eps(raw: &str) -> Result<RingCfg> {
    let eps: f64 = raw.parse().with_context(|| format!("not a number: {raw}"))?;
    Ok(RingCfg::new(eps)?)
}

impl Source {
    fn load(&self) -> Result<ProblemInstance> {
        match (&self.input, &self.a, &self.b) {
            (Some(path), _, _) => input::load_json(path),
            (None, Some(a), Some(b)) => input::load_csv(a, b, &self.d),
            _ => bail!("pass --input <file.json> or --a <a.csv> --b <b.csv> --d <list>"),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Strategy {
    Mean,
    Intersection,
}

impl From<Strategy> for Aggregation {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Mean => Aggregation::Mean,
            Strategy::Intersection => Aggregation::Intersection,
        }
    }
}

/// JSON written by `solve`.
#[derive(Debug, Serialize)]
struct SolutionReport {
    alpha: f64,
    alpha_tilde: f64,
    strategy: Strategy,
    positions: Vec<f64>,
    /// `(caller, center)` pairs whose region misses the chosen position.
    uncovered: Vec<(usize, usize)>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = cmd.cfg;
    match cmd.action {
        Action::Demo => demo(cfg),
        Action::Solve {
            source,
            alpha,
            strategy,
            out,
        } => {
            let inst = source.load()?;
            solve(&inst, alpha, strategy, cfg, &out)
        }
        Action::Threshold { source } => threshold(&source.load()?),
        Action::Report => report(),
    }
}

fn demo(cfg: RingCfg) -> Result<()> {
    let inst = reference_instance();
    tracing::info!(
        m = inst.m(),
        n = inst.n(),
        alpha_tilde = inst.minimum_threshold(),
        "reference_instance"
    );
    for (scenario, alpha) in [("no_threshold", None), ("alpha_8", Some(8.0)), ("alpha_5", Some(5.0))] {
        match inst.solve_with(alpha, Aggregation::Mean, cfg) {
            Ok(sol) => {
                let uncovered = inst.audit(&sol, cfg).len();
                tracing::info!(scenario, alpha = sol.alpha, positions = ?sol.positions, uncovered, "solved");
                println!("{scenario}: alpha={} positions={:?}", sol.alpha, sol.positions);
            }
            Err(e @ SolveError::InfeasibleThreshold { .. }) => {
                tracing::warn!(scenario, error = %e, "infeasible");
                println!("{scenario}: {e}");
            }
        }
    }
    Ok(())
}

fn solve(
    inst: &ProblemInstance,
    alpha: Option<f64>,
    strategy: Strategy,
    cfg: RingCfg,
    out: &Path,
) -> Result<()> {
    let alpha_tilde = inst.minimum_threshold();
    tracing::info!(m = inst.m(), n = inst.n(), alpha_tilde, ?alpha, ?strategy, "solve");
    let sol = inst
        .solve_with(alpha, strategy.into(), cfg)
        .context("solving instance")?;
    let uncovered = inst
        .audit(&sol, cfg)
        .into_iter()
        .map(|v| (v.caller, v.center))
        .collect::<Vec<_>>();
    if !uncovered.is_empty() {
        tracing::warn!(count = uncovered.len(), "placement misses contributing callers");
    }
    let report = SolutionReport {
        alpha: sol.alpha,
        alpha_tilde,
        strategy,
        positions: sol.positions,
        uncovered,
    };

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let params = serde_json::json!({
        "alpha": alpha,
        "strategy": strategy,
        "eps": cfg.eps_tie,
        "m": inst.m(),
        "n": inst.n(),
    });
    let prov = provenance::write_sidecar(out, params, alpha_tilde)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote");
    Ok(())
}

fn threshold(inst: &ProblemInstance) -> Result<()> {
    let obj = serde_json::json!({
        "alpha_tilde": inst.minimum_threshold(),
        "bottleneck_caller": inst.bottleneck_caller(),
        "caller_best": inst.caller_best_distances().as_slice(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::Provenance::new(serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
