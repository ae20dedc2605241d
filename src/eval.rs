//! The per-type component evaluator.
//!
//! [`evaluate`] maps a component's kind, its resolved input levels, the
//! current time step and its sequential state to a vector of output
//! levels. It is deterministic in `(kind, inputs, time, state-before)`
//! and never fails: missing or out-of-range inputs read as 0, unknown
//! kinds produce zero outputs. All sequential semantics (edge detection,
//! counting, shifting) live here; the caller owns nothing but the state
//! slot it passes in.

use crate::component::{Component, ComponentKind};
use crate::state::ComponentState;
use crate::types::{bit, pin, truthy, TimeStep, Value};

/// Logical complement as a level: truthy becomes 0, falsy becomes 1.
#[inline]
fn invert(v: Value) -> Value {
    if truthy(v) {
        0.0
    } else {
        1.0
    }
}

/// Rising-edge detector over raw clock levels.
#[inline]
fn rising(clk: Value, prev: Value) -> bool {
    truthy(clk) && !truthy(prev)
}

/// Evaluates one component for the current time step.
///
/// `inputs` is the resolved input vector (one level per input pin, in pin
/// order); `state` is this component's slot in the simulation's state
/// arena and is the only thing mutated. Returns one level per output pin.
pub fn evaluate(
    component: &Component,
    inputs: &[Value],
    time: TimeStep,
    state: &mut ComponentState,
) -> Vec<Value> {
    match &component.kind {
        // Sources
        ComponentKind::Input | ComponentKind::Switch | ComponentKind::Button => {
            vec![component.level()]
        }

        ComponentKind::Clock => {
            let frequency = state.clock().frequency;
            let period = 10.0 / frequency;
            let phase = ((time as f64 / period).floor() as i64).rem_euclid(2);
            vec![phase as Value]
        }

        ComponentKind::Battery | ComponentKind::Vcc => vec![1.0],

        ComponentKind::Ground => Vec::new(),

        // Gates
        ComponentKind::And => vec![if inputs.iter().all(|&v| truthy(v)) { 1.0 } else { 0.0 }],
        ComponentKind::Or => vec![if inputs.iter().any(|&v| truthy(v)) { 1.0 } else { 0.0 }],
        ComponentKind::Not => vec![invert(pin(inputs, 0))],
        ComponentKind::Nand => vec![if inputs.iter().all(|&v| truthy(v)) { 0.0 } else { 1.0 }],
        ComponentKind::Nor => vec![if inputs.iter().any(|&v| truthy(v)) { 0.0 } else { 1.0 }],
        ComponentKind::Xor => {
            let ones = inputs.iter().filter(|&&v| truthy(v)).count();
            vec![if ones % 2 == 1 { 1.0 } else { 0.0 }]
        }
        ComponentKind::Xnor => {
            let ones = inputs.iter().filter(|&&v| truthy(v)).count();
            vec![if ones % 2 == 0 { 1.0 } else { 0.0 }]
        }

        // Flip-flops: inputs end with the clock pin; q latches the raw level
        ComponentKind::Dff => {
            let ff = state.flip_flop();
            let clk = pin(inputs, 1);
            if rising(clk, ff.prev_clk) {
                ff.q = pin(inputs, 0);
            }
            ff.prev_clk = clk;
            vec![ff.q, invert(ff.q)]
        }

        ComponentKind::Tff => {
            let ff = state.flip_flop();
            let clk = pin(inputs, 1);
            if rising(clk, ff.prev_clk) && truthy(pin(inputs, 0)) {
                ff.q = invert(ff.q);
            }
            ff.prev_clk = clk;
            vec![ff.q, invert(ff.q)]
        }

        ComponentKind::Jkff => {
            let ff = state.flip_flop();
            let clk = pin(inputs, 2);
            if rising(clk, ff.prev_clk) {
                let j = truthy(pin(inputs, 0));
                let k = truthy(pin(inputs, 1));
                if j && k {
                    ff.q = invert(ff.q);
                } else if j {
                    ff.q = 1.0;
                } else if k {
                    ff.q = 0.0;
                }
            }
            ff.prev_clk = clk;
            vec![ff.q, invert(ff.q)]
        }

        // Level-sensitive; S=R=1 holds
        ComponentKind::Srff => {
            let ff = state.flip_flop();
            let s = truthy(pin(inputs, 0));
            let r = truthy(pin(inputs, 1));
            if s && !r {
                ff.q = 1.0;
            } else if !s && r {
                ff.q = 0.0;
            }
            vec![ff.q, invert(ff.q)]
        }

        // Multiplexers route raw levels, not coerced bits
        ComponentKind::Mux2 => {
            vec![if truthy(pin(inputs, 2)) { pin(inputs, 1) } else { pin(inputs, 0) }]
        }

        ComponentKind::Mux4 => {
            let sel = (bit(pin(inputs, 4)) << 1) | bit(pin(inputs, 5));
            vec![pin(inputs, sel)]
        }

        ComponentKind::Demux2 => {
            let data = pin(inputs, 0);
            if truthy(pin(inputs, 1)) {
                vec![0.0, data]
            } else {
                vec![data, 0.0]
            }
        }

        ComponentKind::Demux4 => {
            let sel = (bit(pin(inputs, 1)) << 1) | bit(pin(inputs, 2));
            let mut out = vec![0.0; 4];
            out[sel] = pin(inputs, 0);
            out
        }

        // Decoders: input 0 is the LSB
        ComponentKind::Decoder2 => {
            let idx = bit(pin(inputs, 0)) | (bit(pin(inputs, 1)) << 1);
            let mut out = vec![0.0; 4];
            out[idx] = 1.0;
            out
        }

        ComponentKind::Decoder3 => {
            let idx = bit(pin(inputs, 0))
                | (bit(pin(inputs, 1)) << 1)
                | (bit(pin(inputs, 2)) << 2);
            let mut out = vec![0.0; 8];
            out[idx] = 1.0;
            out
        }

        // Priority encoders: highest active line wins, code is LSB first
        ComponentKind::Encoder4 => {
            for i in (0..4).rev() {
                if truthy(pin(inputs, i)) {
                    return vec![(i & 1) as Value, ((i >> 1) & 1) as Value];
                }
            }
            vec![0.0, 0.0]
        }

        ComponentKind::Encoder8 => {
            for i in (0..8).rev() {
                if truthy(pin(inputs, i)) {
                    return vec![
                        (i & 1) as Value,
                        ((i >> 1) & 1) as Value,
                        ((i >> 2) & 1) as Value,
                    ];
                }
            }
            vec![0.0, 0.0, 0.0]
        }

        // Synchronous reset overrides the clock edge
        ComponentKind::Counter4 => {
            let c = state.counter();
            let clk = pin(inputs, 0);
            if truthy(pin(inputs, 1)) {
                c.count = 0;
            } else if rising(clk, c.prev_clk) {
                c.count = (c.count + 1) % 16;
            }
            c.prev_clk = clk;
            let n = c.count;
            vec![
                (n & 1) as Value,
                ((n >> 1) & 1) as Value,
                ((n >> 2) & 1) as Value,
                ((n >> 3) & 1) as Value,
            ]
        }

        ComponentKind::Register4 => {
            let r = state.register();
            let clk = pin(inputs, 4);
            if rising(clk, r.prev_clk) {
                r.value = (bit(pin(inputs, 0))
                    | (bit(pin(inputs, 1)) << 1)
                    | (bit(pin(inputs, 2)) << 2)
                    | (bit(pin(inputs, 3)) << 3)) as u8;
            }
            r.prev_clk = clk;
            let n = r.value;
            vec![
                (n & 1) as Value,
                ((n >> 1) & 1) as Value,
                ((n >> 2) & 1) as Value,
                ((n >> 3) & 1) as Value,
            ]
        }

        // Serial-in parallel-out, newest bit at the front
        ComponentKind::ShiftRegister => {
            let sr = state.shift_register();
            let clk = pin(inputs, 1);
            if rising(clk, sr.prev_clk) {
                sr.bits = [pin(inputs, 0), sr.bits[0], sr.bits[1], sr.bits[2]];
            }
            sr.prev_clk = clk;
            sr.bits.to_vec()
        }

        // Passives are ideal wires in this digital approximation
        ComponentKind::Resistor | ComponentKind::Capacitor | ComponentKind::Inductor => {
            vec![pin(inputs, 0)]
        }

        // One-way valve: positive levels pass, everything else blocks
        ComponentKind::Diode | ComponentKind::ZenerDiode | ComponentKind::Photodiode => {
            let v = pin(inputs, 0);
            vec![if v > 0.0 { v } else { 0.0 }]
        }

        // Pass-gates: input 0 is the control terminal
        ComponentKind::TransistorNpn => {
            let (base, collector) = (pin(inputs, 0), pin(inputs, 1));
            vec![if truthy(base) && truthy(collector) { collector } else { 0.0 }]
        }

        ComponentKind::TransistorPnp => {
            let (base, emitter) = (pin(inputs, 0), pin(inputs, 1));
            vec![if !truthy(base) && truthy(emitter) { emitter } else { 0.0 }]
        }

        ComponentKind::MosfetN => {
            vec![if truthy(pin(inputs, 0)) { pin(inputs, 1) } else { 0.0 }]
        }

        ComponentKind::MosfetP => {
            vec![if truthy(pin(inputs, 0)) { 0.0 } else { pin(inputs, 1) }]
        }

        // Ideal comparator
        ComponentKind::OpAmp => {
            vec![if pin(inputs, 0) - pin(inputs, 1) > 0.0 { 1.0 } else { 0.0 }]
        }

        ComponentKind::Relay => vec![if truthy(pin(inputs, 0)) { 1.0 } else { 0.0 }],

        // Sinks latch their input for display and drive nothing
        ComponentKind::Buzzer
        | ComponentKind::Lamp
        | ComponentKind::Motor
        | ComponentKind::Display7Seg => {
            state.sink().value = pin(inputs, 0);
            Vec::new()
        }

        // Free-running astable approximation: toggles every 10 evaluations
        ComponentKind::Ic555 => {
            let t = state.timer555();
            t.counter = (t.counter + 1) % 10;
            if t.counter == 0 {
                t.output = invert(t.output);
            }
            vec![t.output]
        }

        // Generic IC forwards its first `outputs` inputs unchanged
        ComponentKind::Ic => {
            let n = component.outputs.max(1);
            inputs.iter().take(n).copied().collect()
        }

        // No evaluation rule: zero outputs sized to the pin count
        ComponentKind::Output | ComponentKind::Led | ComponentKind::Other(_) => {
            vec![0.0; component.outputs.max(1)]
        }
    }
}
