//! Configuration for the canonical-huffman application.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it reads one line from stdin.
//! `--print-config` shows every resolved value (including the sample seed)
//! so runs are reproducible.

/// Where the text to encode comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Text given on the command line
    Text(String),
    /// Generated sample text (see `input_gen`)
    Sample,
    /// One line read from stdin
    Stdin,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    /// Where the input comes from
    pub source: InputSource,

    /// Seed for sample generation
    pub seed: u64,

    /// Length of a generated sample
    pub sample_len: usize,

    // === Validation ===
    /// Minimum accepted input length in bytes
    pub min_len: usize,

    /// Reject bytes outside printable ASCII (32-126)
    pub printable_only: bool,

    // === Report ===
    /// Number of stream bits shown in the preview
    pub preview_bits: usize,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the metrics block
    pub print_metrics: bool,

    // === Logging ===
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If `--sample` is given without `--seed`, a time-based seed is used.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut text: Option<String> = None;
        let mut sample = false;
        let mut seed: Option<u64> = None;
        let mut sample_len: Option<usize> = None;
        let mut min_len: Option<usize> = None;
        let mut printable_only = true;
        let mut preview_bits: Option<usize> = None;
        let mut log_level: Option<String> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--text" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--text requires a value".to_string());
                    }
                    text = Some(args[i].clone());
                }
                "--sample" => {
                    sample = true;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-len" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-len requires a number".to_string());
                    }
                    sample_len = Some(args[i].parse().map_err(|_| "invalid sample-len")?);
                }
                "--min-len" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--min-len requires a number".to_string());
                    }
                    min_len = Some(args[i].parse().map_err(|_| "invalid min-len")?);
                }
                "--allow-any-byte" => {
                    printable_only = false;
                }
                "--preview-bits" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--preview-bits requires a number".to_string());
                    }
                    preview_bits = Some(args[i].parse().map_err(|_| "invalid preview-bits")?);
                }
                "--log-level" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--log-level requires a value".to_string());
                    }
                    log_level = Some(args[i].clone());
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let source = match (text, sample) {
            (Some(_), true) => {
                return Err("--text and --sample are mutually exclusive".to_string());
            }
            (Some(text), false) => InputSource::Text(text),
            (None, true) => InputSource::Sample,
            (None, false) => InputSource::Stdin,
        };

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        let config = Config {
            source,
            seed,
            sample_len: sample_len.unwrap_or(64),
            min_len: min_len.unwrap_or(30),
            printable_only,
            preview_bits: preview_bits.unwrap_or(128),
            print_config,
            print_metrics,
            log_level: log_level.unwrap_or_else(|| "warn".to_string()),
        };

        Ok(config)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.source {
            InputSource::Text(text) => println!("Input: command line ({} bytes)", text.len()),
            InputSource::Sample => {
                println!("Input: generated sample ({} bytes)", self.sample_len);
                println!("Seed: {}", self.seed);
            }
            InputSource::Stdin => println!("Input: stdin (one line)"),
        }
        println!("Minimum length: {} bytes", self.min_len);
        println!(
            "Allowed bytes: {}",
            if self.printable_only {
                "printable ASCII (32-126)"
            } else {
                "any"
            }
        );
        println!("Preview bits: {}", self.preview_bits);
        println!("Log level: {}", self.log_level);
        println!();
    }
}

fn print_help() {
    println!("canonical-huffman: canonical Huffman code builder and encoder");
    println!();
    println!("USAGE:");
    println!("    canonical-huffman [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --text <TEXT>           Encode TEXT instead of reading a line from stdin");
    println!("    --sample                Encode a generated sample line");
    println!("    --seed <N>              Seed for the sample (default: time-based)");
    println!("    --sample-len <N>        Sample length in bytes (default: 64)");
    println!();
    println!("    --min-len <N>           Minimum input length (default: 30)");
    println!("    --allow-any-byte        Accept bytes outside printable ASCII");
    println!("    --preview-bits <N>      Stream bits shown in the preview (default: 128)");
    println!();
    println!("    --log-level <LEVEL>     Log filter when RUST_LOG is unset (default: warn)");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print the metrics block");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    echo 'abracadabra abracadabra abracadabra' | canonical-huffman");
    println!("    canonical-huffman --sample --seed 42");
    println!("    canonical-huffman --text 'aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa'");
    println!();
}
