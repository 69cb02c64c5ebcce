use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct LookupJson {
    drivers: BTreeMap<String, f64>,
}

/// Immutable driver-code → team-performance-score table.
///
/// Loaded once before serving begins and never mutated afterwards, so it is
/// shared across workers without locking. Keys are canonical uppercase
/// 3-letter codes; scores are season points normalized to [0,1].
#[derive(Debug, Default)]
pub struct LookupStore {
    drivers: BTreeMap<String, f64>,
}

impl LookupStore {
    /// Parse the lookup artifact: `{"drivers": {"VER": 0.53, ...}}`.
    pub fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read lookup table at {}", path))?;
        let parsed: LookupJson =
            serde_json::from_str(&text).with_context(|| "failed to parse lookup JSON")?;
        Ok(Self {
            drivers: parsed.drivers,
        })
    }

    /// Empty table: every request will be rejected as an unknown driver.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            drivers: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Exact-match resolution; callers uppercase the code first.
    /// Unknown codes get `None`, never a default score.
    pub fn resolve(&self, code: &str) -> Option<f64> {
        self.drivers.get(code).copied()
    }

    /// All known codes, sorted ascending (BTreeMap iteration order).
    pub fn known_codes(&self) -> Vec<&str> {
        self.drivers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
