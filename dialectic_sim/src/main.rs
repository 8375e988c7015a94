//! Dialectic Simulator CLI
//!
//! Runs the example Reality/Antireality evolution once.

use clap::Parser;
use dialectic_sim::{RunReport, SimConfig, SimError, SimExport, SimWorld};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Dialectic simulation CLI
#[derive(Parser, Debug)]
#[command(name = "dialectic-sim")]
#[command(about = "Run the seeded Reality/Antireality evolution", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON summary on stdout
    #[arg(long)]
    json: bool,

    /// Export the full run to a JSON file
    #[arg(long)]
    export: Option<String>,
}

fn run(config: SimConfig, export_path: Option<&str>) -> Result<RunReport, SimError> {
    let noise_std = config.noise_std;
    let mut world = SimWorld::new(config)?;
    let report = world.run()?;

    if let Some(path) = export_path {
        let export = SimExport::from_report(&report, noise_std);
        export.write_to_file(path)?;
        info!("Exported {} steps to {}", export.steps.len(), path);
    }

    Ok(report)
}

/// Log filter: `RUST_LOG` directives when given, else INFO (DEBUG with `--verbose`).
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let directives = std::env::var("RUST_LOG").ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(args.verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    } else {
        args.seed
    };

    if !args.json {
        info!("Dialectic Simulator v0.1.0 (seed={})", seed);
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let config = SimConfig {
        seed,
        ..Default::default()
    };

    let report = match run(config, args.export.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            error!("✗ Run failed: {}", e);
            std::process::exit(1);
        }
    };

    let final_midpoint = report.coevolution.shared.last();

    if args.json {
        let summary = serde_json::json!({
            "seed": report.seed,
            "observed_state": report.observed_state,
            "godel_limited": report.godel_limited,
            "steps": report.evolution.len(),
            "domain_violations": report.domain_violations,
            "level_a": report.coevolution.a.level(),
            "level_b": report.coevolution.b.level(),
            "final_midpoint": final_midpoint,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("Observed state: {}", report.observed_state);
        info!(
            "Steps: {} | domain violations: {}",
            report.evolution.len(),
            report.domain_violations
        );
        info!(
            "Levels: a={:.4} b={:.4} | final midpoint: {:.4}",
            report.coevolution.a.level(),
            report.coevolution.b.level(),
            final_midpoint.unwrap_or(f64::NAN)
        );
        info!("✅ Run complete");
    }
}
