//! canonical-huffman: reads a line of text, builds its canonical Huffman
//! code and prints the tables, the tree and the encoded stream.

mod config;
mod input;
mod input_gen;
mod report;

use std::process::ExitCode;

use anyhow::{Context, Result};
use canonical_huffman_core::compress;
use canonical_huffman_core::metrics::Metrics;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {err}");
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    init_logging(&config.log_level);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("run failed: {err:#}");
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install a stderr subscriber; RUST_LOG wins over `--log-level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let input = input::read_input(config)?;
    input::validate(&input, config.min_len, config.printable_only)?;

    let mut metrics = Metrics::new();
    let compression = compress(&input).context("failed to build the code")?;
    metrics.record(&compression);
    metrics.complete();

    info!(
        symbols = metrics.input_symbols,
        distinct = metrics.distinct_symbols,
        compressed_bits = metrics.compressed_bits,
        elapsed_us = metrics.duration().as_micros() as u64,
        "encoded input"
    );
    debug!(
        merges = metrics.tree_merges,
        max_code_length = metrics.max_code_length,
        "code construction finished"
    );

    print!("{}", report::render(&compression, &metrics, config.preview_bits));

    if config.print_metrics {
        println!("\n=== Metrics ===");
        print!("{}", metrics.export_text());
    }

    Ok(())
}
