//! # Circuitsim
//!
//! A discrete-time digital logic circuit simulation engine.
//!
//! Circuits are graphs of palette components (gates, flip-flops,
//! multiplexers, encoders, counters, registers, analog stand-ins, power
//! sources, ICs) connected by wires. The engine computes every
//! component's output levels per time step, threading sequential state
//! (flip-flops, counters, shift registers) across steps, and records the
//! result as per-signal waveform series.
//!
//! ## Design principles
//!
//! - **Lenient evaluation**: partially built circuits simulate without
//!   failing — unwired pins, dangling wires and unknown component kinds
//!   all degrade to level 0. Strict checking is opt-in via
//!   [`Circuit::validate`].
//! - **Explicit state ownership**: sequential memory lives in a state
//!   arena inside the [`Simulation`] session, keyed by component id;
//!   component records themselves stay inert data.
//! - **List-order stepping**: within a step, components evaluate in list
//!   order and see the outputs of earlier components in that same step.
//!   There is no topological sorting; a component listed before its
//!   driver reads 0 for the step.
//!
//! ## Quick start
//!
//! ```
//! use circuitsim::{simulate_circuit, CircuitBuilder, Component, ComponentKind};
//!
//! let circuit = CircuitBuilder::new("half-adder")
//!     .add(Component::new("a", ComponentKind::Input, "A").with_value(1.0))
//!     .add(Component::new("b", ComponentKind::Input, "B").with_value(1.0))
//!     .add(Component::new("sum", ComponentKind::Xor, "SUM"))
//!     .add(Component::new("carry", ComponentKind::And, "CARRY"))
//!     .wire("a", 0, "sum", 0)
//!     .wire("b", 0, "sum", 1)
//!     .wire("a", 0, "carry", 0)
//!     .wire("b", 0, "carry", 1)
//!     .build()
//!     .unwrap();
//!
//! let waveform = simulate_circuit(&circuit.components, &circuit.wires, 4);
//! assert_eq!(waveform.numeric_signal("SUM").unwrap(), vec![Some(0.0); 4]);
//! assert_eq!(waveform.numeric_signal("CARRY").unwrap(), vec![Some(1.0); 4]);
//! ```
//!
//! For step-at-a-time driving (toggling switches between steps), create a
//! [`Simulation`] session and call [`Simulation::step`] directly.
//!
//! Waveforms from external simulators arrive as VCD text; [`parse_vcd`]
//! decodes them into the same [`WaveformData`] shape.

pub mod circuit;
pub mod component;
pub mod engine;
pub mod eval;
pub mod palette;
pub mod state;
pub mod types;
pub mod vcd;
pub mod waveform;

// Re-export commonly used types
pub use circuit::{Circuit, CircuitBuilder, CircuitError, CircuitResult, PinRef, Wire, WirePoint};
pub use component::{Component, ComponentKind};
pub use engine::{resolve_inputs, simulate_circuit, Simulation};
pub use eval::evaluate;
pub use palette::{Category, KindSpec};
pub use state::ComponentState;
pub use types::{ComponentId, PinIndex, TimeStep, Value};
pub use vcd::parse_vcd;
pub use waveform::{SignalValue, WaveformData};

/// Initialize the tracing subscriber for logging.
///
/// Call this at the start of your program to enable logging.
///
/// # Example
///
/// ```rust,ignore
/// circuitsim::init_logging("info");
/// ```
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
