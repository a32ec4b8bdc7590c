use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

/// Prints `label` on stderr and reads one line from stdin.
///
/// Input is not masked. Fails on end of input.
pub fn read_secret(label: &str) -> Result<String> {
    let stdin = io::stdin();
    read_line_from(&mut stdin.lock(), label)
}

fn read_line_from(reader: &mut impl BufRead, label: &str) -> Result<String> {
    eprint!("{label}");
    io::stderr().flush().ok();

    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        bail!("No input for '{}'", label.trim_end_matches([':', ' ']));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
