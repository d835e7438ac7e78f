//! Tolerant record extraction.
//!
//! Recovers record-like JSON objects from text that may be a clean array,
//! an array buried in other text, newline-delimited objects, or a hand-edited
//! near miss. Stages run from cheapest to most permissive and the first one
//! that produces records wins. Nothing here returns an error: a corrupt
//! fragment is dropped, and a feed with no recoverable objects yields an
//! empty list.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::core::RawRecord;
use crate::ingest::scanner::object_spans;

/// Which stage produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractStage {
    /// Whole text was a valid JSON array
    Strict,
    /// Text between the first `[` and last `]` was a valid JSON array
    Bracketed,
    /// Objects recovered one by one by the brace scanner
    Scanned,
    /// One object per line
    Lines,
}

/// Outcome of one extraction
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<RawRecord>,

    /// `None` when nothing could be recovered
    pub stage: Option<ExtractStage>,

    /// Candidate fragments that failed to parse
    pub dropped: usize,
}

impl Extraction {
    fn from_stage(stage: ExtractStage, records: Vec<RawRecord>, dropped: usize) -> Self {
        Self {
            records,
            stage: Some(stage),
            dropped,
        }
    }
}

/// Extract raw records from arbitrary feed text.
pub fn extract_records(text: &str) -> Vec<RawRecord> {
    extract(text).records
}

/// Extract raw records, reporting which stage recovered them.
pub fn extract(text: &str) -> Extraction {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    if text.is_empty() {
        return Extraction::default();
    }

    let sanitized = replace_lone_surrogates(text);
    let text = sanitized.as_ref();

    if let Some(records) = parse_array(text) {
        tracing::debug!("Feed parsed as strict array ({} records)", records.len());
        return Extraction::from_stage(ExtractStage::Strict, records, 0);
    }

    if let Some(body) = bracketed(text) {
        if let Some(records) = parse_array(body) {
            tracing::debug!("Feed parsed from bracketed array ({} records)", records.len());
            return Extraction::from_stage(ExtractStage::Bracketed, records, 0);
        }

        let (records, dropped) = scan_objects(body);
        if !records.is_empty() {
            tracing::debug!(
                "Brace scanner recovered {} records, dropped {} fragments",
                records.len(),
                dropped
            );
            return Extraction::from_stage(ExtractStage::Scanned, records, dropped);
        }
    }

    let (records, dropped) = parse_lines(text);
    if records.is_empty() {
        tracing::debug!("No records recovered from feed ({} fragments dropped)", dropped);
        return Extraction {
            dropped,
            ..Extraction::default()
        };
    }

    tracing::debug!(
        "Line fallback recovered {} records, dropped {} lines",
        records.len(),
        dropped
    );
    Extraction::from_stage(ExtractStage::Lines, records, dropped)
}

/// Rewrite `\uXXXX` escapes of unpaired UTF-16 surrogates as `\ufffd`.
///
/// serde_json rejects them, which would cost the whole record; a browser
/// decodes them to U+FFFD. Valid surrogate pairs and escaped backslashes are
/// left alone.
fn replace_lone_surrogates(text: &str) -> Cow<'_, str> {
    if !text.contains("\\u") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }

        match surrogate_at(bytes, i) {
            Some(0xD800..=0xDBFF) if matches!(surrogate_at(bytes, i + 6), Some(0xDC00..=0xDFFF)) => {
                i += 12;
            }
            Some(_) => {
                out.push_str(&text[last..i]);
                out.push_str("\\ufffd");
                i += 6;
                last = i;
            }
            // Any other escape: skip the escaped character
            None => i += 2,
        }
    }

    if last == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[last..]);
    Cow::Owned(out)
}

/// UTF-16 surrogate code unit of a `\uXXXX` escape starting at `i`
fn surrogate_at(bytes: &[u8], i: usize) -> Option<u16> {
    let escape = bytes.get(i..i + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' || !escape[2..].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    let unit = u16::from_str_radix(hex, 16).ok()?;
    (0xD800..=0xDFFF).contains(&unit).then_some(unit)
}

/// Strict parse as a JSON array; non-object elements carry no record and are skipped.
fn parse_array(text: &str) -> Option<Vec<RawRecord>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn parse_object(text: &str) -> Option<RawRecord> {
    serde_json::from_str::<RawRecord>(text).ok()
}

/// Substring from the first `[` to the last `]`, inclusive.
fn bracketed(text: &str) -> Option<&str> {
    let open = text.find('[')?;
    let close = text.rfind(']')?;
    (close > open).then(|| &text[open..=close])
}

fn scan_objects(body: &str) -> (Vec<RawRecord>, usize) {
    let mut records = Vec::new();
    let mut dropped = 0;

    for span in object_spans(body) {
        match parse_object(span) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    (records, dropped)
}

fn parse_lines(text: &str) -> (Vec<RawRecord>, usize) {
    let mut records = Vec::new();
    let mut dropped = 0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line == "[" || line == "]" {
            continue;
        }

        let line = line.strip_suffix(',').map(str::trim_end).unwrap_or(line);
        if !(line.starts_with('{') && line.ends_with('}')) {
            continue;
        }

        match parse_object(line) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    (records, dropped)
}
