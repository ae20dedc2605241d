//! Sequential state for stateful components.
//!
//! State is the sole carrier of memory across time steps. It lives in a
//! per-simulation arena keyed by component id (see
//! [`Simulation`](crate::engine::Simulation)), never on the component
//! record itself, and is mutated only by the evaluator for the owning
//! component's kind.

use serde::{Deserialize, Serialize};

use crate::component::ComponentKind;
use crate::types::Value;

/// State of a free-running clock source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    /// Toggle rate; the square-wave period is `10 / frequency` steps.
    pub frequency: f64,
}

impl Default for ClockState {
    fn default() -> Self {
        Self { frequency: 1.0 }
    }
}

/// State shared by all flip-flop kinds.
///
/// `q` holds the raw latched value (a DFF latches whatever level its data
/// pin carried, not a coerced bit). `prev_clk` is the clock level seen at
/// the previous evaluation, used for rising-edge detection; the
/// level-sensitive SR flip-flop leaves it untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlipFlopState {
    pub q: Value,
    pub prev_clk: Value,
}

/// State of the 4-bit synchronous up counter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current count, always in `0..16`.
    pub count: u8,
    pub prev_clk: Value,
}

/// State of the 4-bit parallel-load register.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterState {
    /// Latched 4-bit value.
    pub value: u8,
    pub prev_clk: Value,
}

/// State of the 4-stage serial shift register.
///
/// `bits[0]` is the most recently shifted-in value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftRegisterState {
    pub bits: [Value; 4],
    pub prev_clk: Value,
}

/// State of the free-running 555 timer approximation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timer555State {
    /// Current output level.
    pub output: Value,
    /// Internal counter, wraps mod 10; the output toggles on each wrap.
    pub counter: u8,
}

/// Latched display value of a sink component (buzzer/lamp/motor/display).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SinkState {
    pub value: Value,
}

/// Per-component sequential state, one variant per stateful kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ComponentState {
    /// Combinational components carry no memory.
    #[default]
    Stateless,
    Clock(ClockState),
    FlipFlop(FlipFlopState),
    Counter(CounterState),
    Register(RegisterState),
    ShiftRegister(ShiftRegisterState),
    Timer555(Timer555State),
    Sink(SinkState),
}

macro_rules! state_accessor {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&mut self) -> &mut $ty {
            if !matches!(self, Self::$variant(_)) {
                *self = Self::$variant(<$ty>::default());
            }
            match self {
                Self::$variant(inner) => inner,
                _ => unreachable!(),
            }
        }
    };
}

impl ComponentState {
    /// The zero state a component of `kind` starts from.
    pub fn initial(kind: &ComponentKind) -> Self {
        match kind {
            ComponentKind::Clock => Self::Clock(ClockState::default()),
            ComponentKind::Dff | ComponentKind::Tff | ComponentKind::Jkff | ComponentKind::Srff => {
                Self::FlipFlop(FlipFlopState::default())
            }
            ComponentKind::Counter4 => Self::Counter(CounterState::default()),
            ComponentKind::Register4 => Self::Register(RegisterState::default()),
            ComponentKind::ShiftRegister => Self::ShiftRegister(ShiftRegisterState::default()),
            ComponentKind::Ic555 => Self::Timer555(Timer555State::default()),
            kind if kind.is_sink() => Self::Sink(SinkState::default()),
            _ => Self::Stateless,
        }
    }

    state_accessor!(
        /// The clock state, re-initializing if the variant does not match.
        clock, Clock, ClockState);
    state_accessor!(
        /// The flip-flop state, re-initializing if the variant does not match.
        flip_flop, FlipFlop, FlipFlopState);
    state_accessor!(
        /// The counter state, re-initializing if the variant does not match.
        counter, Counter, CounterState);
    state_accessor!(
        /// The register state, re-initializing if the variant does not match.
        register, Register, RegisterState);
    state_accessor!(
        /// The shift-register state, re-initializing if the variant does not match.
        shift_register, ShiftRegister, ShiftRegisterState);
    state_accessor!(
        /// The 555 timer state, re-initializing if the variant does not match.
        timer555, Timer555, Timer555State);
    state_accessor!(
        /// The sink latch, re-initializing if the variant does not match.
        sink, Sink, SinkState);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_per_kind() {
        assert_eq!(
            ComponentState::initial(&ComponentKind::Clock),
            ComponentState::Clock(ClockState { frequency: 1.0 })
        );
        assert!(matches!(
            ComponentState::initial(&ComponentKind::Dff),
            ComponentState::FlipFlop(_)
        ));
        assert!(matches!(
            ComponentState::initial(&ComponentKind::Counter4),
            ComponentState::Counter(_)
        ));
        assert!(matches!(
            ComponentState::initial(&ComponentKind::Lamp),
            ComponentState::Sink(_)
        ));
        assert_eq!(
            ComponentState::initial(&ComponentKind::And),
            ComponentState::Stateless
        );
    }

    #[test]
    fn test_accessor_reinitializes_on_mismatch() {
        let mut state = ComponentState::Stateless;
        state.flip_flop().q = 1.0;
        assert_eq!(
            state,
            ComponentState::FlipFlop(FlipFlopState { q: 1.0, prev_clk: 0.0 })
        );

        // Switching access repurposes the slot with fresh zero state
        assert_eq!(state.counter().count, 0);
        assert!(matches!(state, ComponentState::Counter(_)));
    }

    #[test]
    fn test_state_serde_round_trip() {
        let state = ComponentState::ShiftRegister(ShiftRegisterState {
            bits: [1.0, 0.0, 1.0, 1.0],
            prev_clk: 1.0,
        });
        let json = serde_json::to_string(&state).unwrap();
        let back: ComponentState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
