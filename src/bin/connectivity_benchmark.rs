// Connectivity benchmark: times verify_connectivity on generated networks of
// increasing size and writes `size, time` rows to a CSV file.
//
// Usage:
//   cargo run --release --bin connectivity_benchmark -- [output_path] [size...]
//
// Sizes, repetitions and output path default to the config values
// (benchmark.sizes / benchmark.repetitions / benchmark.output_path).

use rail_tycoon::benchmark::{write_results_file, ConnectivityBenchmark, NetworkGenerator};
use rail_tycoon::config::{get_default_config_path, ConfigManager};
use rail_tycoon::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_json();

    let config = ConfigManager::load(get_default_config_path())?;

    let mut args = std::env::args().skip(1);
    let output_path = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.get_benchmark_output_path());

    let cli_sizes = args
        .map(|raw| raw.trim().parse::<usize>())
        .collect::<Result<Vec<usize>, _>>()?;
    let sizes = if cli_sizes.is_empty() {
        config.get_benchmark_sizes()
    } else {
        cli_sizes
    };

    let generator = NetworkGenerator {
        construction_date: config.get_default_construction_date(),
        ..NetworkGenerator::default()
    };
    let benchmark = ConnectivityBenchmark::new(generator);
    let samples = benchmark.run(&sizes, config.get_benchmark_repetitions())?;

    write_results_file(&output_path, &samples)?;

    for sample in &samples {
        println!(
            "size={} time={:.3}s connected={}",
            sample.size,
            sample.elapsed.as_secs_f64(),
            sample.connected
        );
    }
    println!("results written to {}", output_path);
    Ok(())
}
