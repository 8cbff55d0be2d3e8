mod logging;
mod run;

use clap::Parser;
use plate_core::{PlateParams, ProgressLog, RelaxConfig, RelaxationEngine, Schedule};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use run::{RunReport, initialize, relax, write_field};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Relax a batch of random valid plates and record one JSON line per case.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Number of cases to run
    #[arg(long, default_value_t = 32)]
    cases: usize,

    /// Smallest map order sampled
    #[arg(long, default_value_t = 3)]
    n_min: usize,

    /// Largest map order sampled
    #[arg(long, default_value_t = 64)]
    n_max: usize,

    /// Smallest epsilon sampled (log-uniform up to 1)
    #[arg(long, default_value_t = 1e-4)]
    eps_min: f64,

    /// Stop a case after this many passes
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Worker threads for each relaxation pass (0 = sequential)
    #[arg(long, default_value_t = plate_core::DEFAULT_WORKERS)]
    threads: usize,

    /// Base RNG seed (reproducibility)
    #[arg(long, default_value_t = 123)]
    seed: u64,
}

#[derive(Serialize)]
struct CaseRow {
    case_idx: usize,
    base_seed: u64,
    case_seed: u64,
    #[serde(flatten)]
    report: RunReport,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    if args.n_max < args.n_min {
        return Err("n_max must be >= n_min".into());
    }
    // Fail early on a range the core would reject for every case.
    PlateParams::new(args.n_min, 0.0, 0.0, args.eps_min).map_err(|e| e.to_string())?;
    PlateParams::new(args.n_max, 0.0, 0.0, 1.0).map_err(|e| e.to_string())?;

    let schedule = match args.threads {
        0 => Schedule::Sequential,
        workers => Schedule::Parallel { workers },
    };

    fs::create_dir_all(&args.out)?;

    let mut field_writer = BufWriter::new(File::create(args.out.join("fields.bin"))?);
    let mut case_file = BufWriter::new(
        OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(args.out.join("cases.jsonl"))?,
    );

    let mut not_converged = 0usize;

    for case_idx in 0..args.cases {
        // Deterministic per-case seed, stable under reordering.
        let case_seed = args.seed ^ ((case_idx as u64).wrapping_mul(0x9E3779B97F4A7C15));
        let mut rng = ChaCha8Rng::seed_from_u64(case_seed);

        let n = rng.gen_range(args.n_min..=args.n_max);
        let north = rng.gen_range(0.0..=100.0);
        let wall = rng.gen_range(0.0..=100.0);
        let epsilon = args.eps_min.powf(rng.gen_range(0.0..=1.0));

        let params = PlateParams::new(n, north, wall, epsilon).map_err(|e| e.to_string())?;
        let config = RelaxConfig::from_params(&params)
            .with_schedule(schedule)
            .with_max_iterations(args.max_iterations);
        let engine = RelaxationEngine::new(config.clone()).map_err(|e| e.to_string())?;

        let mut init = initialize(&params).map_err(|e| e.to_string())?;
        let average = init.fields.average();
        let initial_checksum = init.fields.current().checksum();

        let mut log = ProgressLog::new();
        let relaxed = relax(&engine, &mut init.fields, &mut log);
        if !relaxed.outcome.converged() {
            not_converged += 1;
        }

        let field = init.fields.into_current();
        write_field(&mut field_writer, field.n(), field.cells())?;

        let row = CaseRow {
            case_idx,
            base_seed: args.seed,
            case_seed,
            report: RunReport {
                params,
                config,
                average,
                initial_checksum,
                init_secs: init.elapsed.as_secs_f64(),
                relax_secs: relaxed.elapsed.as_secs_f64(),
                termination: relaxed.outcome.termination,
                iterations: relaxed.outcome.iterations,
                residual: relaxed.outcome.residual,
                final_checksum: field.checksum(),
                progress: log.points().to_vec(),
            },
        };

        serde_json::to_writer(&mut case_file, &row)?;
        case_file.write_all(b"\n")?;

        tracing::info!(case_idx, n, iterations = relaxed.outcome.iterations, "case done");
    }

    field_writer.flush()?;
    case_file.flush()?;

    println!("Wrote sweep to: {}", args.out.display());
    println!("Cases: {} (not converged: {})", args.cases, not_converged);

    Ok(())
}
