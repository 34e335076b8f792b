use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::assignment::derangement::{is_derangement, Deranger, DEFAULT_MAX_ATTEMPTS};
use std::time::{Duration, Instant};

struct BenchmarkResult {
    participants: usize,
    samples: u32,
    mean_attempts: f64,
    max_attempts_seen: u32,
    fallbacks: u32,
    elapsed: Duration,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Samples the derangement generator and reports retry statistics"
)]
struct BenchmarkCli {
    /// Comma-separated list of participant counts (e.g. 2,3,10,100)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize))]
    participants: Option<Vec<usize>>,
    /// Drawings per participant count
    #[arg(long, default_value_t = 10_000)]
    samples: u32,
    /// Shuffles tried before the rotation fallback
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = BenchmarkCli::parse();
    println!("=== Derangement Generator Benchmark ===\n");

    let sizes = cli
        .participants
        .unwrap_or_else(|| vec![2, 3, 5, 10, 50, 100, 1000]);
    let deranger = Deranger::new(cli.max_attempts);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut results = Vec::new();
    for &n in &sizes {
        if n < 2 {
            eprintln!("  ✗ skipping n={n}: a derangement needs at least 2 participants");
            continue;
        }
        println!("Sampling n={} participants, {} drawings", n, cli.samples);
        match run_benchmark(&deranger, n, cli.samples, &mut rng) {
            Ok(result) => results.push(result),
            Err(e) => eprintln!("  ✗ Benchmark failed: {}", e),
        }
    }

    println!("\n=== Summary Report ===\n");
    print_summary_table(&results);
}

fn run_benchmark(
    deranger: &Deranger,
    n: usize,
    samples: u32,
    rng: &mut StdRng,
) -> Result<BenchmarkResult, Box<dyn std::error::Error>> {
    let mut total_attempts = 0u64;
    let mut shuffled = 0u32;
    let mut max_attempts_seen = 0u32;
    let mut fallbacks = 0u32;

    let start = Instant::now();
    for sample in 0..samples {
        let derangement = deranger.derange_indices(n, rng);
        if !is_derangement(derangement.indices()) {
            return Err(format!("sample {sample} produced a fixed point").into());
        }
        match derangement.attempts() {
            Some(attempts) => {
                total_attempts += attempts as u64;
                shuffled += 1;
                max_attempts_seen = max_attempts_seen.max(attempts);
            }
            None => fallbacks += 1,
        }
    }
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        participants: n,
        samples,
        mean_attempts: if shuffled == 0 {
            0.0
        } else {
            total_attempts as f64 / shuffled as f64
        },
        max_attempts_seen,
        fallbacks,
        elapsed,
    })
}

fn print_summary_table(results: &[BenchmarkResult]) {
    println!(
        "{:>8} | {:>8} | {:>13} | {:>12} | {:>9} | {:>12}",
        "n", "samples", "mean attempts", "max attempts", "fallbacks", "µs/drawing"
    );
    println!("{}", "-".repeat(80));
    for result in results {
        let per_drawing = if result.samples == 0 {
            0.0
        } else {
            result.elapsed.as_secs_f64() * 1_000_000.0 / result.samples as f64
        };
        println!(
            "{:>8} | {:>8} | {:>13.3} | {:>12} | {:>9} | {:>12.2}",
            result.participants,
            result.samples,
            result.mean_attempts,
            result.max_attempts_seen,
            result.fallbacks,
            per_drawing
        );
    }
}
