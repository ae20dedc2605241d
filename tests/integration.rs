//! End-to-end simulation scenarios.
//!
//! These tests build whole circuits — sources, combinational logic,
//! sequential elements, sinks — and run them through the step driver,
//! checking the recorded waveform against hand-computed expectations.

use circuitsim::{
    simulate_circuit, Circuit, CircuitBuilder, Component, ComponentKind, Simulation,
};

fn input(id: &str, label: &str) -> Component {
    Component::new(id, ComponentKind::Input, label).with_value(0.0)
}

fn half_adder() -> Circuit {
    CircuitBuilder::new("half-adder")
        .add(input("a", "A"))
        .add(input("b", "B"))
        .add(Component::new("xor", ComponentKind::Xor, "SUM"))
        .add(Component::new("and", ComponentKind::And, "CARRY"))
        .add(Component::new("led_s", ComponentKind::Lamp, "LED_S"))
        .add(Component::new("led_c", ComponentKind::Lamp, "LED_C"))
        .wire("a", 0, "xor", 0)
        .wire("b", 0, "xor", 1)
        .wire("a", 0, "and", 0)
        .wire("b", 0, "and", 1)
        .wire("xor", 0, "led_s", 0)
        .wire("and", 0, "led_c", 0)
        .build()
        .unwrap()
}

// ============================================================================
// Half-adder scenario
// ============================================================================

#[test]
fn half_adder_truth_table_over_four_steps() {
    let mut sim = Simulation::new(half_adder());

    // Drive (A,B) through 00, 01, 10, 11, one step each
    for (a, b) in [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)] {
        sim.set_value("a", a);
        sim.set_value("b", b);
        sim.step();
    }

    let wf = sim.waveform();
    assert_eq!(
        wf.numeric_signal("SUM").unwrap(),
        vec![Some(0.0), Some(1.0), Some(1.0), Some(0.0)]
    );
    assert_eq!(
        wf.numeric_signal("CARRY").unwrap(),
        vec![Some(0.0), Some(0.0), Some(0.0), Some(1.0)]
    );

    // The LEDs latched the final levels for display
    assert_eq!(sim.display_value("led_s"), Some(0.0));
    assert_eq!(sim.display_value("led_c"), Some(1.0));
}

#[test]
fn half_adder_single_run_entry_point() {
    let mut circuit = half_adder();
    circuit.components[0].value = Some(1.0);
    circuit.components[1].value = Some(1.0);

    let wf = simulate_circuit(&circuit.components, &circuit.wires, 5);
    assert_eq!(wf.numeric_signal("SUM").unwrap(), vec![Some(0.0); 5]);
    assert_eq!(wf.numeric_signal("CARRY").unwrap(), vec![Some(1.0); 5]);
}

// ============================================================================
// Waveform shape
// ============================================================================

#[test]
fn waveform_shape_holds_for_any_step_count() {
    let circuit = half_adder();
    for steps in [0u64, 1, 4, 100] {
        let wf = simulate_circuit(&circuit.components, &circuit.wires, steps);

        assert_eq!(wf.time.len() as u64, steps);
        assert_eq!(wf.time, (0..steps).collect::<Vec<_>>());
        assert!(wf.is_consistent());
        // Sinks never appear; sources and gates always do (when steps > 0)
        assert!(wf.signal("LED_S").is_none());
        if steps > 0 {
            for name in ["A", "B", "SUM", "CARRY"] {
                assert_eq!(wf.signal(name).unwrap().len() as u64, steps);
            }
        }
    }
}

#[test]
fn signal_order_follows_component_list() {
    let wf = simulate_circuit(&half_adder().components, &half_adder().wires, 1);
    let names: Vec<&str> = wf.signals.keys().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "SUM", "CARRY"]);
}

// ============================================================================
// Routing components inside circuits
// ============================================================================

#[test]
fn mux_selects_between_two_sources() {
    let circuit = CircuitBuilder::new("mux")
        .add(input("d0", "D0"))
        .add(input("d1", "D1"))
        .add(input("sel", "SEL"))
        .add(Component::new("mux", ComponentKind::Mux2, "OUT"))
        .wire("d0", 0, "mux", 0)
        .wire("d1", 0, "mux", 1)
        .wire("sel", 0, "mux", 2)
        .build()
        .unwrap();

    let mut sim = Simulation::new(circuit);
    sim.set_value("d0", 1.0);
    sim.set_value("d1", 0.0);
    sim.step();
    sim.set_value("sel", 1.0);
    sim.step();
    sim.set_value("d1", 1.0);
    sim.step();

    assert_eq!(
        sim.waveform().numeric_signal("OUT").unwrap(),
        vec![Some(1.0), Some(0.0), Some(1.0)]
    );
}

#[test]
fn decoder_drives_one_hot_lamp() {
    // decoder2 output 2 -> lamp; selected when (in0,in1) = (0,1)
    let circuit = CircuitBuilder::new("decode")
        .add(input("b0", "B0"))
        .add(input("b1", "B1"))
        .add(Component::new("dec", ComponentKind::Decoder2, "DEC"))
        .add(Component::new("lamp", ComponentKind::Lamp, "LAMP"))
        .wire("b0", 0, "dec", 0)
        .wire("b1", 0, "dec", 1)
        .wire("dec", 2, "lamp", 0)
        .build()
        .unwrap();

    let mut sim = Simulation::new(circuit);
    sim.set_value("b1", 1.0);
    sim.step();
    assert_eq!(sim.display_value("lamp"), Some(1.0));

    sim.set_value("b0", 1.0);
    sim.step();
    assert_eq!(sim.display_value("lamp"), Some(0.0));
}

#[test]
fn power_rail_through_relay_lights_lamp() {
    let circuit = CircuitBuilder::new("rail")
        .add(Component::new("vcc", ComponentKind::Vcc, "VCC"))
        .add(Component::new("relay", ComponentKind::Relay, "RELAY"))
        .add(Component::new("lamp", ComponentKind::Lamp, "LAMP"))
        .wire("vcc", 0, "relay", 0)
        .wire("relay", 0, "lamp", 0)
        .build()
        .unwrap();

    let mut sim = Simulation::new(circuit);
    sim.step();
    assert_eq!(sim.display_value("lamp"), Some(1.0));
}

#[test]
fn counter_clocked_by_free_running_clock() {
    // Clock period is 10 steps, so each full period yields one rising edge
    let circuit = CircuitBuilder::new("clocked-counter")
        .add(Component::new("clk", ComponentKind::Clock, "CLK"))
        .add(Component::new("cnt", ComponentKind::Counter4, "Q0"))
        .wire("clk", 0, "cnt", 0)
        .build()
        .unwrap();

    let wf = simulate_circuit(&circuit.components, &circuit.wires, 40);

    // Edges at t=10 and t=30: LSB goes 0 -> 1 -> 0
    let q0 = wf.numeric_signal("Q0").unwrap();
    assert_eq!(q0[9], Some(0.0));
    assert_eq!(q0[10], Some(1.0));
    assert_eq!(q0[29], Some(1.0));
    assert_eq!(q0[30], Some(0.0));
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn loaded_document_simulates_like_built_circuit() {
    let circuit = half_adder();
    let json = circuit.to_json().unwrap();
    let loaded = Circuit::from_json(&json).unwrap();
    loaded.validate().unwrap();

    let a = simulate_circuit(&circuit.components, &circuit.wires, 4);
    let b = simulate_circuit(&loaded.components, &loaded.wires, 4);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn waveform_interchange_shape() {
    let mut circuit = half_adder();
    circuit.components[0].value = Some(1.0);

    let wf = simulate_circuit(&circuit.components, &circuit.wires, 2);
    let json: serde_json::Value = serde_json::from_str(&wf.to_json().unwrap()).unwrap();

    assert_eq!(json["time"], serde_json::json!([0, 1]));
    assert!(json["signals"].is_object());
    assert_eq!(json["signals"]["SUM"].as_array().unwrap().len(), 2);
}
