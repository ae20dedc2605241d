//! Half-adder walkthrough.
//!
//! Builds a half-adder (XOR for the sum bit, AND for the carry bit) with
//! lamp sinks, drives the A/B inputs through all four combinations one
//! step at a time, and prints the recorded waveform as CSV.

use circuitsim::{Circuit, CircuitBuilder, Component, ComponentKind, Simulation};

const STEPS: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)];

fn build_half_adder() -> Circuit {
    CircuitBuilder::new("half-adder")
        .add(Component::new("a", ComponentKind::Input, "A"))
        .add(Component::new("b", ComponentKind::Input, "B"))
        .add(Component::new("xor", ComponentKind::Xor, "SUM"))
        .add(Component::new("and", ComponentKind::And, "CARRY"))
        .add(Component::new("lamp_s", ComponentKind::Lamp, "LAMP_S"))
        .add(Component::new("lamp_c", ComponentKind::Lamp, "LAMP_C"))
        .wire("a", 0, "xor", 0)
        .wire("b", 0, "xor", 1)
        .wire("a", 0, "and", 0)
        .wire("b", 0, "and", 1)
        .wire("xor", 0, "lamp_s", 0)
        .wire("and", 0, "lamp_c", 0)
        .build()
        .expect("half-adder wiring is valid")
}

fn main() {
    circuitsim::init_logging("info");

    println!("==== Half-adder example ====");
    println!("Driving (A,B) through 00, 01, 10, 11.\n");

    let mut sim = Simulation::new(build_half_adder());

    for (a, b) in STEPS {
        sim.set_value("a", a);
        sim.set_value("b", b);
        sim.step();
    }

    print!("{}", sim.waveform().to_csv());

    println!(
        "\nLamps after the last step: sum={} carry={}",
        sim.display_value("lamp_s").unwrap_or(0.0),
        sim.display_value("lamp_c").unwrap_or(0.0)
    );
}
