//! Grid dimensions persisted in a query string (`rows=7&columns=3&...`).

use std::fmt;

use itertools::Itertools;
use log::warn;

use crate::{error::GridError, grid::GridSpec};

pub const ROWS: &str = "rows";
pub const COLUMNS: &str = "columns";

/// Ordered `key=value` pairs. Pairs without `=` are kept verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`. Empty segments are dropped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (segment.to_string(), None),
            })
            .collect();
        QueryParams { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// First value stored under `key` (matched after encoding).
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = encode_component(key);
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Update `key` in place if present, else append it. Other pairs keep their order.
    pub fn upsert(&mut self, key: &str, value: impl fmt::Display) {
        let key = encode_component(key);
        let value = encode_component(&value.to_string());
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = Some(value),
            None => self.pairs.push((key, Some(value))),
        }
    }

    /// Leading integer of `key`'s value (`"12px"` → 12). Missing, unparseable or
    /// non-positive values yield `default`.
    pub fn get_int(&self, key: &str, default: usize) -> usize {
        match self.get(key).map(|raw| parse_dimension(key, raw)) {
            Some(Ok(n)) => n,
            Some(Err(err)) => {
                warn!("{}; using default {}", err, default);
                default
            }
            None => default,
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .pairs
            .iter()
            .map(|(k, v)| match v {
                Some(v) => format!("{}={}", k, v),
                None => k.clone(),
            })
            .join("&");
        write!(f, "{}", joined)
    }
}

fn parse_dimension(key: &str, raw: &str) -> Result<usize, GridError> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>();
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(GridError::InvalidDimension { name: key.to_string(), value: raw.to_string() }),
    }
}

/// Percent-encode everything outside the URI-component unreserved set.
pub fn encode_component(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

impl GridSpec {
    /// Read `rows`/`columns`, falling back per-dimension to `defaults`.
    pub fn read(params: &QueryParams, defaults: GridSpec) -> GridSpec {
        GridSpec {
            rows: params.get_int(ROWS, defaults.rows),
            columns: params.get_int(COLUMNS, defaults.columns),
        }
    }

    pub fn write(&self, params: &mut QueryParams) {
        params.upsert(ROWS, self.rows);
        params.upsert(COLUMNS, self.columns);
    }
}
