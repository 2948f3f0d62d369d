use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gradedpres_core::{
    segre_presentation, veronese_presentation_with, AlgebraEngine, EngineConfig, ExactEngine, Field,
    GradedRing, Presentation, RedundancyTest, RingDescription, VeroneseOptions, VeroneseOutcome,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = ExactEngine::new(EngineConfig {
        max_pairs: cli.max_pairs,
    });
    match cli.cmd {
        Command::Demo => run_demo(&engine, cli.json),
        Command::Segre { left, right } => run_segre(&engine, &left, &right, cli.json),
        Command::Veronese { ring, n, redundancy } => run_veronese(&engine, &ring, n, redundancy, cli.json),
        Command::HilbertBasis { weights } => run_hilbert_basis(&engine, &weights, cli.json),
        Command::Basis { ring, degree } => run_basis(&engine, &ring, degree, cli.json),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[derive(Parser, Debug)]
#[command(
    name = "gradedpres",
    about = "Explicit presentations of Segre products and Veronese subrings"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Stop a Groebner basis computation after this many critical pairs
    #[arg(long, global = true)]
    max_pairs: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Veronese embedding of P^1 and the Segre embedding of P^1 x P^1
    Demo,

    /// Present the Segre product of two rings
    Segre {
        /// Ring description (JSON) of the first factor
        left: PathBuf,

        /// Ring description (JSON) of the second factor
        right: PathBuf,
    },

    /// Present the n-th Veronese subring of a ring
    Veronese {
        /// Ring description (JSON)
        ring: PathBuf,

        /// Degree divisor
        #[arg(long, allow_hyphen_values = true)]
        n: i64,

        /// Redundancy test for candidate generators (product, span)
        #[arg(long, default_value = "product")]
        redundancy: RedundancyTest,
    },

    /// Hilbert basis of {v >= 0 : weights . v = 0}
    HilbertBasis {
        /// Weight vector, comma separated
        #[arg(long, num_args = 1.., value_delimiter = ',', allow_hyphen_values = true)]
        weights: Vec<i64>,
    },

    /// Monomial basis of one graded piece of a ring
    Basis {
        /// Ring description (JSON)
        ring: PathBuf,

        /// Degree of the piece
        #[arg(long, allow_hyphen_values = true)]
        degree: i64,
    },
}

fn load_ring(path: &Path, engine: &ExactEngine) -> Result<GradedRing> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let desc = RingDescription::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    let ring = desc
        .build(&engine.config)
        .with_context(|| format!("building ring from {}", path.display()))?;
    debug!(path = %path.display(), %ring, "loaded ring");
    Ok(ring)
}

fn print_presentation(title: &str, p: &Presentation, json: bool) -> Result<()> {
    let report = p.report();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{}", title);
    println!("  target:  {}", report.target);
    println!("  ambient: {}", report.ambient);
    println!("  generators ({}):", report.variables.len());
    for v in &report.variables {
        println!("    {} (deg {:?}) -> {}", v.name, v.degree, v.image);
    }
    println!("  relations ({}):", report.relations.len());
    for r in &report.relations {
        println!("    {}", r);
    }
    println!(
        "  [check] relations vanish under the map: {}",
        if p.verify() { "OK" } else { "MISMATCH" }
    );
    Ok(())
}

fn run_demo(engine: &ExactEngine, json: bool) -> Result<()> {
    let line = GradedRing::standard(Field::Rationals, "x", &[1, 1]);
    let cubic = veronese_presentation_with(engine, &line, 3, &VeroneseOptions::default())?;
    if let Some(p) = cubic.presentation() {
        print_presentation("3rd Veronese subring of QQ[x_1, x_2] (twisted cubic)", p, json)?;
    }

    let left = GradedRing::standard(Field::Rationals, "u", &[1, 1]);
    let right = GradedRing::standard(Field::Rationals, "v", &[1, 1]);
    let quadric = segre_presentation(engine, &left, &right)?;
    print_presentation("Segre product of QQ[u_1, u_2] and QQ[v_1, v_2]", &quadric, json)
}

fn run_segre(engine: &ExactEngine, left: &Path, right: &Path, json: bool) -> Result<()> {
    let r = load_ring(left, engine)?;
    let s = load_ring(right, engine)?;
    let p = segre_presentation(engine, &r, &s).context("computing the Segre product")?;
    print_presentation(&format!("Segre product of {} and {}", r, s), &p, json)
}

fn run_veronese(engine: &ExactEngine, path: &Path, n: i64, redundancy: RedundancyTest, json: bool) -> Result<()> {
    let ring = load_ring(path, engine)?;
    let options = VeroneseOptions { redundancy };
    let outcome = veronese_presentation_with(engine, &ring, n, &options).context("computing the Veronese subring")?;
    match outcome {
        VeroneseOutcome::Presented(p) => {
            print_presentation(&format!("Veronese subring of {} (n = {})", ring, n), &p, json)
        }
        VeroneseOutcome::Unchanged(r) => {
            if json {
                println!("{}", serde_json::json!({ "unchanged": r.to_string() }));
            } else {
                println!("{} has no generators; it is its own Veronese subring", r);
            }
            Ok(())
        }
    }
}

fn run_hilbert_basis(engine: &ExactEngine, weights: &[i64], json: bool) -> Result<()> {
    let cone = engine.build_cone_from_inequalities(gradedpres_core::cone::identity(weights.len()), vec![weights.to_vec()])?;
    let basis = engine.hilbert_basis(&cone)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&basis)?);
        return Ok(());
    }
    println!("Hilbert basis of {{v >= 0 : {:?} . v = 0}} (size={})", weights, basis.len());
    for (i, v) in basis.iter().enumerate() {
        println!("  {}) {:?}", i + 1, v);
    }
    Ok(())
}

fn run_basis(engine: &ExactEngine, path: &Path, degree: i64, json: bool) -> Result<()> {
    let ring = load_ring(path, engine)?;
    let basis = engine.basis_of_graded_piece(&ring, degree)?;
    let shown: Vec<String> = basis.iter().map(|e| ring.display(e).to_string()).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }
    println!("Degree {} piece of {} (dim={})", degree, ring, shown.len());
    for (i, e) in shown.iter().enumerate() {
        println!("  {}) {}", i + 1, e);
    }
    Ok(())
}
