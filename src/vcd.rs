//! Line-oriented VCD (value change dump) decoder.
//!
//! Parses the subset of the VCD format that waveform display needs:
//! `$var` declarations up to `$enddefinitions`, then `#<time>` markers
//! interleaved with scalar (`0<sym>`, `1<sym>`, `x<sym>`, `z<sym>`) and
//! vector (`b<bits> <sym>`) value changes. Each signal's last known
//! value is carried forward across markers where it does not change
//! (step-and-hold), so the emitted [`WaveformData`] has one sample per
//! signal per time marker — the same shape the simulation engine
//! records, letting both feed one viewer.
//!
//! The decoder is lenient: unparseable lines are skipped and unknown
//! symbols ignored, with a warning.

use std::collections::HashMap;
use tracing::warn;

use crate::types::TimeStep;
use crate::waveform::{SignalValue, WaveformData};

/// Decodes VCD text into waveform data.
pub fn parse_vcd(content: &str) -> WaveformData {
    let mut waveform = WaveformData::new();
    // symbol -> signal name
    let mut symbols: HashMap<&str, String> = HashMap::new();
    // signal name -> last seen value (held across markers)
    let mut held: HashMap<String, SignalValue> = HashMap::new();
    let mut in_header = true;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with("$var") {
            // e.g. `$var wire 1 ! clk $end`
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 5 {
                let symbol = parts[3];
                let name = parts[4];
                symbols.insert(symbol, name.to_string());
                waveform.ensure_series(name);
                held.insert(name.to_string(), SignalValue::Num(0.0));
            }
        } else if line.starts_with("$enddefinitions") {
            in_header = false;
        } else if !in_header {
            if let Some(stamp) = line.strip_prefix('#') {
                if let Ok(t) = stamp.parse::<TimeStep>() {
                    if !waveform.time.is_empty() {
                        flush(&mut waveform, &held);
                    }
                    waveform.push_time(t);
                }
            } else if !line.is_empty() && !line.starts_with('$') {
                apply_change(line, &symbols, &mut held);
            }
        }
    }

    if !waveform.time.is_empty() {
        flush(&mut waveform, &held);
    }

    waveform
}

/// Appends every signal's held value for the current time marker.
fn flush(waveform: &mut WaveformData, held: &HashMap<String, SignalValue>) {
    let names: Vec<String> = waveform.signals.keys().cloned().collect();
    for name in names {
        let value = held
            .get(&name)
            .cloned()
            .unwrap_or(SignalValue::Num(0.0));
        waveform.record(&name, value);
    }
}

/// Applies one value-change line to the held values.
fn apply_change(line: &str, symbols: &HashMap<&str, String>, held: &mut HashMap<String, SignalValue>) {
    let first = line.chars().next().unwrap_or(' ');

    match first {
        '0' | '1' | 'x' | 'z' => {
            let symbol = &line[1..];
            match symbols.get(symbol) {
                Some(name) => {
                    let value = match first {
                        '0' => SignalValue::Num(0.0),
                        '1' => SignalValue::Num(1.0),
                        other => SignalValue::Text(other.to_string()),
                    };
                    held.insert(name.clone(), value);
                }
                None => warn!("value change for undeclared symbol {:?}", symbol),
            }
        }
        'b' => {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                let bits = &parts[0][1..];
                match symbols.get(parts[1]) {
                    Some(name) => {
                        // Bit strings containing x/z stay textual
                        let value = match u64::from_str_radix(bits, 2) {
                            Ok(n) => SignalValue::Num(n as f64),
                            Err(_) => SignalValue::Text(bits.to_string()),
                        };
                        held.insert(name.clone(), value);
                    }
                    None => warn!("vector change for undeclared symbol {:?}", parts[1]),
                }
            }
        }
        _ => {}
    }
}
