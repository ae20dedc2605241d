//! Core type definitions for the circuit simulation engine.
//!
//! This module defines the fundamental types used throughout the simulator.

/// Unique identifier for a component in a circuit.
///
/// Identifiers are opaque strings assigned by whoever builds the circuit
/// (an editor assigns UUID-like strings, tests use short names).
pub type ComponentId = String;

/// Discrete simulation time, counted in whole steps from 0.
///
/// A run over `n` steps produces waveform samples at times `0..n`.
pub type TimeStep = u64;

/// Index of an input or output pin on a component.
pub type PinIndex = usize;

/// A sampled signal level.
///
/// Levels are plain numbers rather than a logic enum: source components
/// may be driven with arbitrary scalars and pass-through components carry
/// them unchanged, so only the consumers that need a logic level reduce a
/// value to a bit via [`truthy`].
pub type Value = f64;

/// Logic-level interpretation of a signal value: anything non-zero is high.
#[inline]
pub fn truthy(v: Value) -> bool {
    v != 0.0
}

/// Reduces a signal value to a single bit (0 or 1).
#[inline]
pub fn bit(v: Value) -> usize {
    truthy(v) as usize
}

/// Reads input pin `i` from a resolved input slice, defaulting to 0.0.
///
/// Out-of-range pins degrade to low rather than failing, which keeps
/// partially wired circuits simulating.
#[inline]
pub fn pin(inputs: &[Value], i: PinIndex) -> Value {
    inputs.get(i).copied().unwrap_or(0.0)
}
