//! Command-line interface for the spermatogenesis simulator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use spermsim::simulation::{CancelToken, SimulationBuilder, DEFAULT_CV};
use spermsim::storage::Database;
use spermsim::ReferenceProteome;

/// Spermsim: a stochastic sperm-viability simulator
///
/// Simulates the random partitioning of a protein repertoire across two
/// rounds of meiotic division and reports the fraction of viable gametes.
#[derive(Parser, Debug)]
#[command(name = "spermsim")]
#[command(author, version, about = "Simulates protein partitioning during spermatogenesis", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation.
    ///
    /// Samples founder proteomes, runs two rounds of division per trial,
    /// and tallies viable gametes.
    Run {
        /// Reference proteome as a JSON object of protein id to expected
        /// count, e.g. {"A": 100.0, "B": 50.0}
        #[arg(short, long)]
        reference: PathBuf,

        /// Minimum retained fraction of a protein's reference count for it
        /// to count as present (0 < cutoff <= 1)
        #[arg(long)]
        cutoff: f64,

        /// Minimum fraction of protein types that must be present for a
        /// gamete to be viable (0 < crucial_prot <= 1)
        #[arg(long)]
        crucial_prot: f64,

        /// Coefficient of variation for founder sampling
        #[arg(long, default_value_t = DEFAULT_CV)]
        cv: f64,

        /// Number of trials (4 gametes per trial)
        #[arg(short = 'n', long, default_value = "1000")]
        trials: usize,

        /// Random seed (default: drawn from entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// Record the run in a SQLite database
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Write the aggregate result as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Show progress bar (pass `--progress false` to disable)
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        progress: bool,
    },

    /// List recorded runs in a database.
    List {
        /// Database path
        #[arg(short, long, default_value = "spermsim.db")]
        database: PathBuf,
    },

    /// Show one recorded run as JSON.
    Show {
        /// Database path
        #[arg(short, long, default_value = "spermsim.db")]
        database: PathBuf,

        /// Run id to show
        run_id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Run {
            reference,
            cutoff,
            crucial_prot,
            cv,
            trials,
            seed,
            database,
            json,
            progress,
        } => run_simulation(
            &reference,
            cutoff,
            crucial_prot,
            cv,
            trials,
            seed,
            database.as_deref(),
            json.as_deref(),
            progress,
        ),
        Commands::List { database } => list_runs(&database),
        Commands::Show { database, run_id } => show_run(&database, &run_id),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_simulation(
    reference_path: &std::path::Path,
    cutoff: f64,
    crucial_prot: f64,
    cv: f64,
    trials: usize,
    seed: Option<u64>,
    database: Option<&std::path::Path>,
    json: Option<&std::path::Path>,
    show_progress: bool,
) -> Result<()> {
    println!("🧬 Spermsim - Running Simulation");
    println!("============================================\n");

    let raw = fs::read_to_string(reference_path)
        .with_context(|| format!("Failed to read {}", reference_path.display()))?;
    let map: BTreeMap<String, f64> =
        serde_json::from_str(&raw).context("Reference proteome is not a JSON object of numbers")?;
    let reference = ReferenceProteome::from_map(map)
        .map_err(|e| anyhow::anyhow!("Invalid reference proteome: {e}"))?;

    let mut builder = SimulationBuilder::new()
        .reference(reference.clone())
        .cutoff(cutoff)
        .crucial_prot(crucial_prot)
        .cv(cv)
        .trials(trials);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build simulation: {e}"))?;

    println!("  Protein types: {}", reference.len());
    println!("  Cutoff: {cutoff}");
    println!("  Crucial protein fraction: {crucial_prot}");
    println!("  CV: {cv}");
    println!("  Trials: {trials} ({} gametes)", trials * 4);
    println!("  Seed: {}", sim.seed());
    println!();

    let pb = if show_progress {
        let pb = ProgressBar::new(trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let observer = pb.clone();
    let result = sim
        .run_with_observer(&CancelToken::new(), move || observer.inc(1))
        .map_err(|e| anyhow::anyhow!("Simulation failed: {e}"))?;
    pb.finish_and_clear();

    println!("✓ Simulation complete!");
    println!("  Total gametes: {}", result.total_gametes);
    println!("  Viable gametes: {}", result.viable_gametes);
    println!("  Viable fraction: {:.4}", result.viable_fraction());

    if let Some(db_path) = database {
        let mut db = Database::open(db_path)
            .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
        let run_id = db
            .insert_run(&result, &reference)
            .map_err(|e| anyhow::anyhow!("Failed to record run: {e}"))?;
        db.close()
            .map_err(|e| anyhow::anyhow!("Failed to close database: {e}"))?;
        println!("  Recorded as run {run_id} in {}", db_path.display());
    }

    if let Some(json_path) = json {
        let file = fs::File::create(json_path)
            .with_context(|| format!("Failed to create {}", json_path.display()))?;
        serde_json::to_writer_pretty(file, &result).context("Failed to write JSON result")?;
        println!("  Wrote JSON result to {}", json_path.display());
    }

    Ok(())
}

fn list_runs(db_path: &std::path::Path) -> Result<()> {
    let db =
        Database::open(db_path).map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    let runs = db
        .list_runs()
        .map_err(|e| anyhow::anyhow!("Failed to list runs: {e}"))?;

    if runs.is_empty() {
        println!("No recorded runs in {}", db_path.display());
        return Ok(());
    }

    println!(
        "{:<38} {:>8} {:>14} {:>10} {:>10}",
        "run id", "cutoff", "crucial_prot", "gametes", "viable"
    );
    for record in &runs {
        println!(
            "{:<38} {:>8} {:>14} {:>10} {:>10}",
            record.run_id,
            record.result.cutoff,
            record.result.crucial_prot,
            record.result.total_gametes,
            record.result.viable_gametes,
        );
    }

    Ok(())
}

fn show_run(db_path: &std::path::Path, run_id: &str) -> Result<()> {
    let db =
        Database::open(db_path).map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    let record = db
        .get_run(run_id)
        .map_err(|e| anyhow::anyhow!("Failed to fetch run: {e}"))?
        .ok_or_else(|| anyhow::anyhow!("No run with id {run_id}"))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
