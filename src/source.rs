//! Record input: a JSON array of objects, or JSON Lines.
//!
//! The format is sniffed from the first non-whitespace byte: `[` means a
//! single JSON array (the request-body shape), anything else is read as one
//! JSON object per line with blank lines skipped. Empty input yields no
//! records.

use crate::compression::auto_detect_reader;
use crate::record::Record;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Parse records from `reader`.
///
/// # Errors
/// Returns an error if the input cannot be read, is not valid JSON, or holds
/// an element that is not a JSON object. Messages name the offending element
/// or line.
///
/// ```
/// use ironnest::source::read_records;
///
/// let array = read_records(r#"[{"a": 1}, {"a": 2}]"#.as_bytes()).unwrap();
/// let lines = read_records("{\"a\": 1}\n\n{\"a\": 2}\n".as_bytes()).unwrap();
/// assert_eq!(array, lines);
/// ```
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = BufReader::new(reader);
    match first_significant_byte(&mut rdr)? {
        None => Ok(Vec::new()),
        Some(b'[') => read_json_array(rdr),
        Some(_) => read_json_lines(rdr),
    }
}

/// Open `path` (decompressing `.gz` / `.zst` transparently) and parse its
/// records with [`read_records`].
pub fn read_records_file(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rdr = auto_detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))?;
    read_records(rdr).with_context(|| format!("read records from {}", path.display()))
}

fn first_significant_byte<R: BufRead>(rdr: &mut R) -> Result<Option<u8>> {
    loop {
        let buf = rdr.fill_buf().context("read input")?;
        if buf.is_empty() {
            return Ok(None);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(i) => {
                let b = buf[i];
                rdr.consume(i);
                return Ok(Some(b));
            }
            None => {
                let n = buf.len();
                rdr.consume(n);
            }
        }
    }
}

fn read_json_array<R: Read>(rdr: R) -> Result<Vec<Record>> {
    let values: Vec<Value> = serde_json::from_reader(rdr).context("parse JSON array of records")?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| into_record(v, format!("element #{i}")))
        .collect()
}

fn read_json_lines<R: BufRead>(rdr: R) -> Result<Vec<Record>> {
    let mut out = Vec::new();
    for (i, line) in rdr.lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let v: Value = serde_json::from_str(&line)
            .with_context(|| format!("parse JSONL line {}: {}", i + 1, line))?;
        out.push(into_record(v, format!("line {}", i + 1))?);
    }
    Ok(out)
}

fn into_record(value: Value, at: impl Display) -> Result<Record> {
    match value {
        Value::Object(record) => Ok(record),
        other => bail!("{at} is not a JSON object: {other}"),
    }
}
