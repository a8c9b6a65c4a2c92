//! Reading and validating the text to encode.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::config::{Config, InputSource};
use crate::input_gen::generate_sample_text;

/// Fetch the input bytes from the configured source.
pub fn read_input(config: &Config) -> Result<Vec<u8>> {
    match &config.source {
        InputSource::Text(text) => {
            info!(bytes = text.len(), "using text from the command line");
            Ok(text.as_bytes().to_vec())
        }
        InputSource::Sample => {
            info!(seed = config.seed, bytes = config.sample_len, "generating sample input");
            Ok(generate_sample_text(config.seed, config.sample_len))
        }
        InputSource::Stdin => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                println!(
                    "Enter a line of text (ASCII 32-126). It must have at least {} characters:",
                    config.min_len
                );
                std::io::stdout().flush().context("failed to flush prompt")?;
            }

            let mut line = Vec::new();
            let read = stdin
                .lock()
                .read_until(b'\n', &mut line)
                .context("failed to read from stdin")?;
            if read == 0 {
                bail!("no input received");
            }

            strip_line_ending(&mut line);
            debug!(bytes = line.len(), "read line from stdin");
            Ok(line)
        }
    }
}

/// Remove a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

/// Check the input against the length and alphabet restrictions.
pub fn validate(input: &[u8], min_len: usize, printable_only: bool) -> Result<()> {
    if input.len() < min_len {
        bail!(
            "input must have at least {} characters (you entered {})",
            min_len,
            input.len()
        );
    }

    if printable_only {
        if let Some(pos) = input.iter().position(|b| !(32..=126).contains(b)) {
            bail!(
                "byte {:#04x} at position {} is outside printable ASCII (32-126)",
                input[pos],
                pos
            );
        }
    }

    Ok(())
}
