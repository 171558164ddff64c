use std::io;
use std::path::{Path, PathBuf};

use super::model::AccelerogramRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while reading an accelerogram.
///
/// Loading is fail-fast: the first problem aborts with no partial record.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("record file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to read record file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed header: {reason}")]
    HeaderParse { reason: String },
    #[error("record declares {expected} samples but only {found} are present")]
    InsufficientSamples { expected: usize, found: usize },
    #[error("line {line}: '{text}' is not a number")]
    SampleParse { line: usize, text: String },
    #[error("line {line}: time step {found} differs from the sampling interval {expected}")]
    NonUniformSampling {
        line: usize,
        expected: f64,
        found: f64,
    },
    #[error("malformed CSV row at line {line}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    fn header(reason: impl Into<String>) -> Self {
        LoadError::HeaderParse {
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an accelerogram from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – header row with `time` and `acceleration` columns
/// * anything else – the fixed-width strong-motion text format, see [`parse_record`]
pub fn load_record(path: &Path) -> Result<AccelerogramRecord, LoadError> {
    let text = read_text(path)?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let record = match ext.as_str() {
        "csv" => parse_csv_record(&text)?,
        _ => parse_record(&text)?,
    };

    log::info!(
        "Loaded {} samples at dt = {} s from {}",
        record.len(),
        record.dt,
        path.display()
    );
    Ok(record)
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// Fixed-width accelerogram
// ---------------------------------------------------------------------------

/// Parse the fixed-width accelerogram layout:
///
/// ```text
/// <free text header>
/// <sample_count> <sample_interval_seconds>
/// <a_0>
/// <a_1>
/// ...
/// <a_{sample_count-1}>
/// ```
///
/// Lines past the declared count are ignored.
pub fn parse_record(text: &str) -> Result<AccelerogramRecord, LoadError> {
    let lines: Vec<&str> = text.lines().collect();

    let header = lines
        .get(1)
        .ok_or_else(|| LoadError::header("missing sample count / interval line"))?;
    let (count, dt) = parse_header(header)?;

    // The declared count is untrusted; size the buffer by the lines actually present.
    let body = &lines[2.min(lines.len())..];
    let mut acceleration = Vec::with_capacity(count.min(body.len()));
    for (i, line) in body.iter().take(count).enumerate() {
        acceleration.push(parse_sample(line, i + 3)?);
    }
    if acceleration.len() < count {
        return Err(LoadError::InsufficientSamples {
            expected: count,
            found: acceleration.len(),
        });
    }

    Ok(AccelerogramRecord::from_samples(dt, acceleration))
}

fn parse_header(line: &str) -> Result<(usize, f64), LoadError> {
    let mut tokens = line.split_whitespace();

    let count_tok = tokens
        .next()
        .ok_or_else(|| LoadError::header("empty sample count / interval line"))?;
    let count: usize = count_tok
        .parse()
        .map_err(|_| LoadError::header(format!("sample count '{count_tok}' is not an integer")))?;

    let dt_tok = tokens
        .next()
        .ok_or_else(|| LoadError::header("sampling interval is missing"))?;
    let dt: f64 = dt_tok
        .parse()
        .map_err(|_| LoadError::header(format!("sampling interval '{dt_tok}' is not a number")))?;

    if count == 0 {
        return Err(LoadError::header("sample count must be at least 1"));
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(LoadError::header(format!(
            "sampling interval must be positive, got {dt}"
        )));
    }
    Ok((count, dt))
}

fn parse_sample(line: &str, line_no: usize) -> Result<f64, LoadError> {
    let tok = line.trim();
    tok.parse::<f64>().map_err(|_| LoadError::SampleParse {
        line: line_no,
        text: tok.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV accelerogram
// ---------------------------------------------------------------------------

/// Relative tolerance on the spacing of CSV time stamps.
const SPACING_TOLERANCE: f64 = 1e-6;

/// CSV layout: header row with at least `time` and `acceleration` columns.
/// The sampling interval is taken from the first two rows and every later
/// step must match it.
fn parse_csv_record(text: &str) -> Result<AccelerogramRecord, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv { line: 1, source })?
        .clone();
    let t_idx = headers
        .iter()
        .position(|h| h == "time")
        .ok_or_else(|| LoadError::header("CSV missing 'time' column"))?;
    let a_idx = headers
        .iter()
        .position(|h| h == "acceleration")
        .ok_or_else(|| LoadError::header("CSV missing 'acceleration' column"))?;

    let mut time = Vec::new();
    let mut acceleration = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let line = row_no + 2;
        let record = result.map_err(|source| LoadError::Csv { line, source })?;
        time.push(parse_sample(record.get(t_idx).unwrap_or(""), line)?);
        acceleration.push(parse_sample(record.get(a_idx).unwrap_or(""), line)?);
    }

    if time.len() < 2 {
        return Err(LoadError::InsufficientSamples {
            expected: 2,
            found: time.len(),
        });
    }

    let dt = time[1] - time[0];
    if !dt.is_finite() || dt <= 0.0 {
        return Err(LoadError::NonUniformSampling {
            line: 3,
            expected: dt,
            found: dt,
        });
    }
    for (k, pair) in time.windows(2).enumerate() {
        let step = pair[1] - pair[0];
        if (step - dt).abs() > SPACING_TOLERANCE * dt {
            return Err(LoadError::NonUniformSampling {
                line: k + 3,
                expected: dt,
                found: step,
            });
        }
    }

    Ok(AccelerogramRecord::from_samples(dt, acceleration))
}
