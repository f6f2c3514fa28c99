//! JSON-lines I/O for the CLI
//!
//! - Input: one JSON request per line
//! - Output: one JSON response per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use super::errors::{CliError, CliResult};

/// Read a single request line. Leading blank lines are skipped.
pub fn read_request<R: BufRead>(reader: &mut R) -> CliResult<String> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(CliError::EmptyInput);
        }
        if !line.trim().is_empty() {
            return Ok(line.trim_end().to_string());
        }
    }
}

/// Iterate over non-blank request lines until EOF
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(Ok(line)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Write one rendered response line and flush
pub fn write_json<W: Write>(writer: &mut W, json: &str) -> CliResult<()> {
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
