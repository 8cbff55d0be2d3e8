mod logging;
mod run;

use clap::Parser;
use plate_core::{PlateParams, ProgressPoint, RelaxConfig, RelaxationEngine, Sampled, Schedule};
use run::{RunReport, initialize, relax, write_field};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Steady-state heat distribution on a square plate.
#[derive(Parser, Debug)]
#[command(author, version, about, allow_negative_numbers = true)]
struct Args {
    /// Map order N (NxN plate, 3 <= N <= 2000)
    n: usize,

    /// North edge ("fire") temperature (0 <= T <= 100)
    fire_temp: f64,

    /// Temperature of the other three walls (0 <= T <= 100)
    wall_temp: f64,

    /// Convergence tolerance on the largest per-cell change (1e-6 <= eps <= 100)
    epsilon: f64,

    /// Worker threads for the relaxation pass
    #[arg(long, default_value_t = plate_core::DEFAULT_WORKERS)]
    threads: usize,

    /// Relax on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    sequential: bool,

    /// Stop after this many passes even if not converged
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Print a JSON run report after the text output
    #[arg(long)]
    json: bool,

    /// Write the final field to this file (u32 order + f64 cells, little-endian)
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    let params = PlateParams::new(args.n, args.fire_temp, args.wall_temp, args.epsilon)
        .map_err(|e| e.to_string())?;

    let schedule = if args.sequential {
        Schedule::Sequential
    } else {
        Schedule::Parallel {
            workers: args.threads,
        }
    };
    let config = RelaxConfig::from_params(&params)
        .with_schedule(schedule)
        .with_max_iterations(args.max_iterations);
    let engine = RelaxationEngine::new(config.clone()).map_err(|e| e.to_string())?;

    let mut init = initialize(&params).map_err(|e| e.to_string())?;
    let initial_checksum = init.fields.current().checksum();

    println!("Running time: {:.6} secs", init.elapsed.as_secs_f64());
    let average = init.fields.average();
    println!("mean: {:.6}", average);
    println!("hmap: {}", initial_checksum);

    let mut progress: Vec<ProgressPoint> = Vec::new();
    let relaxed = {
        let mut observer = Sampled::new(|p: ProgressPoint| {
            println!("{}\t{:.6}", p.iteration, p.residual);
            progress.push(p);
        });
        relax(&engine, &mut init.fields, &mut observer)
    };

    let field = init.fields.into_current();
    let final_checksum = field.checksum();

    println!("Running time: {:.6} secs", relaxed.elapsed.as_secs_f64());
    println!("hmap: {}", final_checksum);

    if let Some(path) = &args.dump {
        let mut w = BufWriter::new(File::create(path)?);
        write_field(&mut w, field.n(), field.cells())?;
        w.flush()?;
    }

    if args.json {
        let report = RunReport {
            params,
            config,
            average,
            initial_checksum,
            init_secs: init.elapsed.as_secs_f64(),
            relax_secs: relaxed.elapsed.as_secs_f64(),
            termination: relaxed.outcome.termination,
            iterations: relaxed.outcome.iterations,
            residual: relaxed.outcome.residual,
            final_checksum,
            progress,
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}
