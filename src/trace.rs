use std::io::BufRead;
use thiserror::Error;

use crate::window::Sample;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_line(text: &str) -> Result<Option<Sample>, serde_json::Error> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some)
}

/// Parses one trace line; `line` is only used for error reporting.
pub fn parse_sample_line(text: &str, line: usize) -> Result<Option<Sample>, TraceError> {
    parse_line(text).map_err(|source| TraceError::Json { line, source })
}

/// Reads a whole trace of one `{"x":..,"y":..,"z":..}` object per line.
/// Extra fields are ignored; blank lines and `#` comments are skipped.
/// Stops at the first malformed line.
pub fn read_samples<R: BufRead>(reader: R) -> Result<Vec<Sample>, TraceError> {
    let mut samples = Vec::new();
    for (idx, text) in reader.lines().enumerate() {
        if let Some(sample) = parse_sample_line(&text?, idx + 1)? {
            samples.push(sample);
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comment_lines() {
        let input = "# recorded at 50 Hz\n{\"x\":1,\"y\":-2,\"z\":32}\n\n{\"x\":0,\"y\":0,\"z\":0,\"ts\":17}\n";
        let samples = read_samples(input.as_bytes()).unwrap();
        assert_eq!(samples, vec![Sample::new(1, -2, 32), Sample::new(0, 0, 0)]);
    }

    #[test]
    fn reports_failing_line() {
        let input = "{\"x\":1,\"y\":2,\"z\":3}\n{\"x\":1,\"y\":2}\n";
        match read_samples(input.as_bytes()) {
            Err(TraceError::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
