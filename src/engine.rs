//! The step driver: input resolution and the simulation session.
//!
//! A [`Simulation`] owns a circuit's components and wires, the state
//! arena carrying sequential memory between steps, and the accumulating
//! waveform. [`simulate_circuit`] is the single-call entry point for a
//! fixed-length run; the session API exists for single-step driving
//! (toggling inputs between steps) and for reset.
//!
//! Evaluation is single-threaded and synchronous: a run over `n` steps
//! and `m` components is one uninterrupted computation with no
//! suspension points. Callers that want progress reporting or
//! cancellation must do so between steps, never inside one — a step's
//! component evaluations assume monotonic prior-output visibility.

use std::collections::HashMap;
use tracing::debug;

use crate::circuit::{Circuit, Wire};
use crate::component::{Component, ComponentKind};
use crate::eval::evaluate;
use crate::state::{ClockState, ComponentState};
use crate::types::{ComponentId, TimeStep, Value};
use crate::waveform::WaveformData;

/// Resolves one component's input levels for the current step.
///
/// For each input pin, the first wire (in wire list order) targeting that
/// pin selects the driver. `input`-kind drivers are read live from their
/// set value, modeling immediate availability of primary inputs within
/// the step; every other driver is read from `step_outputs`, the map of
/// output vectors already computed earlier in this same step. A driver
/// that appears later in the component list has no entry yet and reads
/// as 0 — evaluation order is component list order, not a topological
/// sort. Unwired pins, missing drivers and out-of-range output pins all
/// read as 0.
pub fn resolve_inputs(
    component: &Component,
    wires: &[Wire],
    step_outputs: &HashMap<ComponentId, Vec<Value>>,
    components: &[Component],
) -> Vec<Value> {
    let mut inputs = Vec::with_capacity(component.inputs);

    for pin_index in 0..component.inputs {
        let wire = wires
            .iter()
            .find(|w| w.to.component_id == component.id && w.to.pin_index == pin_index);

        let level = match wire {
            None => 0.0,
            Some(wire) => {
                let source = components
                    .iter()
                    .find(|c| c.id == wire.from.component_id);
                match source {
                    None => 0.0,
                    Some(source) if source.kind == ComponentKind::Input => source.level(),
                    Some(source) => step_outputs
                        .get(&source.id)
                        .and_then(|outputs| outputs.get(wire.from.pin_index))
                        .copied()
                        .unwrap_or(0.0),
                }
            }
        };
        inputs.push(level);
    }

    inputs
}

/// A simulation session over one circuit.
///
/// Sequential state lives in an arena keyed by component id, lazily
/// initialized the first time a component is evaluated and owned
/// exclusively by this session — components themselves stay immutable
/// apart from externally driven source levels.
pub struct Simulation {
    name: String,
    components: Vec<Component>,
    wires: Vec<Wire>,
    states: HashMap<ComponentId, ComponentState>,
    waveform: WaveformData,
    current_step: TimeStep,
}

impl Simulation {
    /// Creates a session for a circuit.
    pub fn new(circuit: Circuit) -> Self {
        Self {
            name: circuit.name,
            components: circuit.components,
            wires: circuit.wires,
            states: HashMap::new(),
            waveform: WaveformData::new(),
            current_step: 0,
        }
    }

    /// Creates a session from bare component and wire lists.
    pub fn from_parts(components: Vec<Component>, wires: Vec<Wire>) -> Self {
        Self::new(Circuit {
            name: String::new(),
            components,
            wires,
        })
    }

    /// The circuit name this session was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The next step index to be simulated.
    pub fn current_step(&self) -> TimeStep {
        self.current_step
    }

    /// Sets the level of an externally driven source (input/switch/button).
    ///
    /// Returns false if no component has that id.
    pub fn set_value(&mut self, id: &str, value: Value) -> bool {
        match self.components.iter_mut().find(|c| c.id == id) {
            Some(comp) => {
                comp.value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Seeds a clock component's frequency (square-wave period is
    /// `10 / frequency` steps; the default is 1).
    pub fn set_clock_frequency(&mut self, id: &str, frequency: f64) {
        self.states.insert(
            id.to_string(),
            ComponentState::Clock(ClockState { frequency }),
        );
    }

    /// Simulates one time step.
    ///
    /// Components evaluate in list order; each sees the outputs of
    /// components evaluated earlier in this same step and zeros for
    /// later ones. Every component with outputs records its first output
    /// into its label's series; `input` components without outputs record
    /// their set level. Silent components (sinks, ground) record nothing.
    pub fn step(&mut self) {
        let t = self.current_step;
        let mut step_outputs: HashMap<ComponentId, Vec<Value>> =
            HashMap::with_capacity(self.components.len());

        for i in 0..self.components.len() {
            let comp = &self.components[i];
            let inputs = resolve_inputs(comp, &self.wires, &step_outputs, &self.components);

            let state = self
                .states
                .entry(comp.id.clone())
                .or_insert_with(|| ComponentState::initial(&comp.kind));
            let outputs = evaluate(comp, &inputs, t, state);

            if comp.outputs > 0 {
                self.waveform
                    .record(&comp.label, outputs.first().copied().unwrap_or(0.0));
            } else if comp.kind == ComponentKind::Input {
                self.waveform.record(&comp.label, comp.level());
            }

            step_outputs.insert(comp.id.clone(), outputs);
        }

        self.waveform.push_time(t);
        self.current_step += 1;
    }

    /// Simulates `steps` consecutive time steps.
    pub fn run(&mut self, steps: u64) {
        debug!(circuit = %self.name, steps, "running simulation");
        for _ in 0..steps {
            self.step();
        }
    }

    /// Clears all sequential state, zeroes `input` component levels and
    /// discards the recorded waveform.
    pub fn reset(&mut self) {
        self.states.clear();
        for comp in &mut self.components {
            if comp.kind == ComponentKind::Input {
                comp.value = Some(0.0);
            }
        }
        self.waveform.clear();
        self.current_step = 0;
    }

    /// The waveform recorded so far.
    pub fn waveform(&self) -> &WaveformData {
        &self.waveform
    }

    /// Consumes the session, returning the recorded waveform.
    pub fn into_waveform(self) -> WaveformData {
        self.waveform
    }

    /// A sink component's latched display value, if it has latched one.
    pub fn display_value(&self, id: &str) -> Option<Value> {
        match self.states.get(id) {
            Some(ComponentState::Sink(sink)) => Some(sink.value),
            _ => None,
        }
    }

    /// A component's sequential state, if any has been initialized.
    pub fn state(&self, id: &str) -> Option<&ComponentState> {
        self.states.get(id)
    }
}

/// Simulates a circuit for `time_steps` steps and returns the waveform.
///
/// Equivalent to a fresh [`Simulation`] run to completion. The result
/// satisfies the shape invariant: `time` has `time_steps` entries and
/// every signal series is exactly as long.
pub fn simulate_circuit(
    components: &[Component],
    wires: &[Wire],
    time_steps: u64,
) -> WaveformData {
    let mut sim = Simulation::from_parts(components.to_vec(), wires.to_vec());
    sim.run(time_steps);
    sim.into_waveform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitBuilder, PinRef};

    fn input(id: &str, label: &str, value: Value) -> Component {
        Component::new(id, ComponentKind::Input, label).with_value(value)
    }

    #[test]
    fn test_resolve_unwired_pins_default_to_zero() {
        let gate = Component::new("g", ComponentKind::And, "G");
        let inputs = resolve_inputs(&gate, &[], &HashMap::new(), &[gate.clone()]);
        assert_eq!(inputs, vec![0.0, 0.0]);
    }

    #[test]
    fn test_resolve_reads_input_sources_live() {
        let circuit = CircuitBuilder::new("t")
            .add(input("a", "A", 1.0))
            .add(Component::new("g", ComponentKind::Not, "G"))
            .wire("a", 0, "g", 0)
            .build()
            .unwrap();

        // No outputs computed yet this step; the input's value is still seen
        let gate = circuit.find_component("g").unwrap();
        let inputs = resolve_inputs(gate, &circuit.wires, &HashMap::new(), &circuit.components);
        assert_eq!(inputs, vec![1.0]);
    }

    #[test]
    fn test_resolve_takes_first_wire_in_list_order() {
        let mut circuit = CircuitBuilder::new("t")
            .add(input("a", "A", 1.0))
            .add(input("b", "B", 0.0))
            .add(Component::new("g", ComponentKind::Not, "G"))
            .wire("a", 0, "g", 0)
            .build()
            .unwrap();
        // Second driver on the same pin, appended after the first
        circuit.wires.push(crate::circuit::Wire::new(
            "w2",
            PinRef::new("b", 0),
            PinRef::new("g", 0),
        ));

        let gate = circuit.find_component("g").unwrap();
        let inputs = resolve_inputs(gate, &circuit.wires, &HashMap::new(), &circuit.components);
        assert_eq!(inputs, vec![1.0]);
    }

    #[test]
    fn test_same_step_visibility_follows_list_order() {
        // not1 -> not2: not2 sees not1's fresh output within the step
        let forward = CircuitBuilder::new("fwd")
            .add(input("a", "A", 0.0))
            .add(Component::new("n1", ComponentKind::Not, "N1"))
            .add(Component::new("n2", ComponentKind::Not, "N2"))
            .wire("a", 0, "n1", 0)
            .wire("n1", 0, "n2", 0)
            .build()
            .unwrap();

        let wf = simulate_circuit(&forward.components, &forward.wires, 1);
        assert_eq!(wf.numeric_signal("N1").unwrap(), vec![Some(1.0)]);
        assert_eq!(wf.numeric_signal("N2").unwrap(), vec![Some(0.0)]);

        // Reversed list order: n2 now evaluates before its driver every
        // step and always reads a zero (the per-step output map does not
        // carry values across steps)
        let mut components = forward.components.clone();
        components.swap(1, 2);
        let wf = simulate_circuit(&components, &forward.wires, 2);
        assert_eq!(
            wf.numeric_signal("N2").unwrap(),
            vec![Some(1.0), Some(1.0)]
        );
    }

    #[test]
    fn test_step_records_one_sample_per_component() {
        let circuit = CircuitBuilder::new("rec")
            .add(input("a", "A", 1.0))
            .add(Component::new("g", ComponentKind::Not, "Y"))
            .add(Component::new("l", ComponentKind::Lamp, "LAMP"))
            .wire("a", 0, "g", 0)
            .wire("g", 0, "l", 0)
            .build()
            .unwrap();

        let mut sim = Simulation::new(circuit);
        sim.step();

        let wf = sim.waveform();
        assert!(wf.is_consistent());
        assert_eq!(wf.len(), 1);
        assert_eq!(wf.numeric_signal("A").unwrap(), vec![Some(1.0)]);
        assert_eq!(wf.numeric_signal("Y").unwrap(), vec![Some(0.0)]);
        // Sinks are silent in the waveform but latch for display
        assert!(wf.signal("LAMP").is_none());
        assert_eq!(sim.display_value("l"), Some(0.0));
    }

    #[test]
    fn test_set_value_between_steps() {
        let circuit = CircuitBuilder::new("drive")
            .add(input("a", "A", 0.0))
            .build()
            .unwrap();

        let mut sim = Simulation::new(circuit);
        sim.step();
        assert!(sim.set_value("a", 1.0));
        sim.step();
        assert!(!sim.set_value("ghost", 1.0));

        assert_eq!(
            sim.waveform().numeric_signal("A").unwrap(),
            vec![Some(0.0), Some(1.0)]
        );
    }

    #[test]
    fn test_reset_clears_state_values_and_waveform() {
        let circuit = CircuitBuilder::new("rst")
            .add(input("a", "A", 1.0))
            .add(Component::new("ff", ComponentKind::Dff, "Q"))
            .add(Component::new("clk", ComponentKind::Clock, "CLK"))
            .wire("a", 0, "ff", 0)
            .wire("clk", 0, "ff", 1)
            .build()
            .unwrap();

        let mut sim = Simulation::new(circuit);
        sim.run(20);
        assert!(sim.state("ff").is_some());

        sim.reset();
        assert_eq!(sim.current_step(), 0);
        assert!(sim.waveform().is_empty());
        assert!(sim.state("ff").is_none());
        // Input levels are zeroed by reset
        sim.step();
        assert_eq!(sim.waveform().numeric_signal("A").unwrap(), vec![Some(0.0)]);
    }

    #[test]
    fn test_clock_frequency_seeding() {
        let circuit = CircuitBuilder::new("clk")
            .add(Component::new("c", ComponentKind::Clock, "CLK"))
            .build()
            .unwrap();

        let mut sim = Simulation::new(circuit);
        sim.set_clock_frequency("c", 2.0); // period 5
        sim.run(6);

        assert_eq!(
            sim.waveform().numeric_signal("CLK").unwrap(),
            vec![Some(0.0); 5]
                .into_iter()
                .chain([Some(1.0)])
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_simulate_circuit_shape_invariant() {
        let circuit = CircuitBuilder::new("shape")
            .add(input("a", "A", 1.0))
            .add(Component::new("g", ComponentKind::Not, "Y"))
            .wire("a", 0, "g", 0)
            .build()
            .unwrap();

        for steps in [0u64, 1, 7, 32] {
            let wf = simulate_circuit(&circuit.components, &circuit.wires, steps);
            assert_eq!(wf.len() as u64, steps);
            assert!(wf.is_consistent());
        }
    }
}
