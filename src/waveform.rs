//! Waveform data: the output artifact of a simulation run.
//!
//! A [`WaveformData`] is a per-signal time series keyed by component
//! label, in component list order, consumable by a waveform viewer. The
//! same shape is produced by the VCD parser so both sources feed one
//! display path. Exports to the interchange JSON shape and to CSV.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{TimeStep, Value};

/// One sampled value in a signal series.
///
/// Simulation always records numbers; VCD traces may carry the
/// four-state letters `x`/`z`, kept as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Num(Value),
    Text(String),
}

impl SignalValue {
    /// The numeric value, if this sample is one.
    pub fn as_num(&self) -> Option<Value> {
        match self {
            Self::Num(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl From<Value> for SignalValue {
    fn from(v: Value) -> Self {
        Self::Num(v)
    }
}

impl From<&str> for SignalValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl std::fmt::Display for SignalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Per-signal time series over discrete steps.
///
/// Invariant: every series holds exactly one value per entry of `time`;
/// values are appended once per step, never rewritten. Signal order
/// follows insertion order so a viewer lists traces the way the circuit
/// lists components.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WaveformData {
    /// Step indices, contiguous from 0.
    pub time: Vec<TimeStep>,
    /// Series keyed by signal name (component label).
    pub signals: IndexMap<String, Vec<SignalValue>>,
}

impl WaveformData {
    /// Creates an empty waveform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when no steps have been recorded.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Creates the series for `name` if it does not exist yet.
    pub fn ensure_series(&mut self, name: &str) {
        if !self.signals.contains_key(name) {
            self.signals.insert(name.to_string(), Vec::new());
        }
    }

    /// Appends a sample to the named series, creating it on first use.
    pub fn record(&mut self, name: &str, value: impl Into<SignalValue>) {
        self.signals
            .entry(name.to_string())
            .or_default()
            .push(value.into());
    }

    /// Appends a step index to the time axis.
    pub fn push_time(&mut self, t: TimeStep) {
        self.time.push(t);
    }

    /// The series recorded under `name`.
    pub fn signal(&self, name: &str) -> Option<&[SignalValue]> {
        self.signals.get(name).map(|s| s.as_slice())
    }

    /// Numeric view of a series; non-numeric samples become `None`.
    pub fn numeric_signal(&self, name: &str) -> Option<Vec<Option<Value>>> {
        self.signals
            .get(name)
            .map(|s| s.iter().map(SignalValue::as_num).collect())
    }

    /// Checks the shape invariant: every series is as long as `time`.
    pub fn is_consistent(&self) -> bool {
        self.signals.values().all(|s| s.len() == self.time.len())
    }

    /// Discards all recorded data.
    pub fn clear(&mut self) {
        self.time.clear();
        self.signals.clear();
    }

    /// Exports the interchange JSON shape
    /// `{"time": [...], "signals": {"name": [...]}}`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses the interchange JSON shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes the JSON export to a file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Exports as CSV: a `time` column followed by one column per signal,
    /// one row per step. Short series pad with empty cells.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        csv.push_str("time");
        for name in self.signals.keys() {
            csv.push(',');
            csv.push_str(name);
        }
        csv.push('\n');

        for (row, t) in self.time.iter().enumerate() {
            csv.push_str(&t.to_string());
            for series in self.signals.values() {
                csv.push(',');
                if let Some(v) = series.get(row) {
                    csv.push_str(&v.to_string());
                }
            }
            csv.push('\n');
        }

        csv
    }

    /// Writes the CSV export to a file.
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, self.to_csv())
    }
}
