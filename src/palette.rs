//! The component palette: a static registry of every known component
//! kind with its display name, category and default pin counts.
//!
//! The evaluator never consults this table at simulation time — pin
//! counts are stamped onto each [`Component`](crate::Component) when it
//! is created — but builders and editors use it to offer the full kind
//! set without hand-writing pin counts.

use serde::{Deserialize, Serialize};

use crate::component::ComponentKind;

/// Palette grouping, mirroring the editor's component drawer sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gates,
    Io,
    FlipFlops,
    Mux,
    Encoders,
    Sequential,
    Passive,
    Active,
    Power,
    Ic,
}

/// Static description of one palette entry.
#[derive(Clone, Debug)]
pub struct KindSpec {
    /// The kind this entry describes.
    pub kind: ComponentKind,
    /// Human-readable display name.
    pub name: &'static str,
    /// Palette grouping.
    pub category: Category,
    /// Default number of input pins.
    pub inputs: usize,
    /// Default number of output pins.
    pub outputs: usize,
}

const PALETTE: &[KindSpec] = &[
    // Logic gates
    KindSpec { kind: ComponentKind::And, name: "AND Gate", category: Category::Gates, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::Or, name: "OR Gate", category: Category::Gates, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::Not, name: "NOT Gate", category: Category::Gates, inputs: 1, outputs: 1 },
    KindSpec { kind: ComponentKind::Nand, name: "NAND Gate", category: Category::Gates, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::Nor, name: "NOR Gate", category: Category::Gates, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::Xor, name: "XOR Gate", category: Category::Gates, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::Xnor, name: "XNOR Gate", category: Category::Gates, inputs: 2, outputs: 1 },
    // Input/output
    KindSpec { kind: ComponentKind::Input, name: "Input", category: Category::Io, inputs: 0, outputs: 1 },
    KindSpec { kind: ComponentKind::Output, name: "Output", category: Category::Io, inputs: 1, outputs: 0 },
    KindSpec { kind: ComponentKind::Led, name: "LED", category: Category::Io, inputs: 1, outputs: 0 },
    KindSpec { kind: ComponentKind::Clock, name: "Clock", category: Category::Io, inputs: 0, outputs: 1 },
    KindSpec { kind: ComponentKind::Switch, name: "Switch", category: Category::Io, inputs: 0, outputs: 1 },
    KindSpec { kind: ComponentKind::Button, name: "Button", category: Category::Io, inputs: 0, outputs: 1 },
    KindSpec { kind: ComponentKind::Buzzer, name: "Buzzer", category: Category::Io, inputs: 1, outputs: 0 },
    KindSpec { kind: ComponentKind::Lamp, name: "Lamp", category: Category::Io, inputs: 1, outputs: 0 },
    KindSpec { kind: ComponentKind::Motor, name: "Motor", category: Category::Io, inputs: 1, outputs: 0 },
    KindSpec { kind: ComponentKind::Display7Seg, name: "7-Segment Display", category: Category::Io, inputs: 7, outputs: 0 },
    // Flip-flops
    KindSpec { kind: ComponentKind::Dff, name: "D Flip-Flop", category: Category::FlipFlops, inputs: 2, outputs: 2 },
    KindSpec { kind: ComponentKind::Tff, name: "T Flip-Flop", category: Category::FlipFlops, inputs: 2, outputs: 2 },
    KindSpec { kind: ComponentKind::Jkff, name: "JK Flip-Flop", category: Category::FlipFlops, inputs: 3, outputs: 2 },
    KindSpec { kind: ComponentKind::Srff, name: "SR Flip-Flop", category: Category::FlipFlops, inputs: 2, outputs: 2 },
    // Multiplexers
    KindSpec { kind: ComponentKind::Mux2, name: "2:1 MUX", category: Category::Mux, inputs: 3, outputs: 1 },
    KindSpec { kind: ComponentKind::Mux4, name: "4:1 MUX", category: Category::Mux, inputs: 6, outputs: 1 },
    KindSpec { kind: ComponentKind::Demux2, name: "1:2 DEMUX", category: Category::Mux, inputs: 2, outputs: 2 },
    KindSpec { kind: ComponentKind::Demux4, name: "1:4 DEMUX", category: Category::Mux, inputs: 3, outputs: 4 },
    // Encoders/decoders
    KindSpec { kind: ComponentKind::Decoder2, name: "2:4 Decoder", category: Category::Encoders, inputs: 2, outputs: 4 },
    KindSpec { kind: ComponentKind::Decoder3, name: "3:8 Decoder", category: Category::Encoders, inputs: 3, outputs: 8 },
    KindSpec { kind: ComponentKind::Encoder4, name: "4:2 Encoder", category: Category::Encoders, inputs: 4, outputs: 2 },
    KindSpec { kind: ComponentKind::Encoder8, name: "8:3 Encoder", category: Category::Encoders, inputs: 8, outputs: 3 },
    // Sequential
    KindSpec { kind: ComponentKind::Counter4, name: "4-bit Counter", category: Category::Sequential, inputs: 2, outputs: 4 },
    KindSpec { kind: ComponentKind::Register4, name: "4-bit Register", category: Category::Sequential, inputs: 5, outputs: 4 },
    KindSpec { kind: ComponentKind::ShiftRegister, name: "Shift Register", category: Category::Sequential, inputs: 3, outputs: 4 },
    // Passive components
    KindSpec { kind: ComponentKind::Resistor, name: "Resistor", category: Category::Passive, inputs: 1, outputs: 1 },
    KindSpec { kind: ComponentKind::Capacitor, name: "Capacitor", category: Category::Passive, inputs: 1, outputs: 1 },
    KindSpec { kind: ComponentKind::Inductor, name: "Inductor", category: Category::Passive, inputs: 1, outputs: 1 },
    KindSpec { kind: ComponentKind::Diode, name: "Diode", category: Category::Passive, inputs: 1, outputs: 1 },
    KindSpec { kind: ComponentKind::ZenerDiode, name: "Zener Diode", category: Category::Passive, inputs: 1, outputs: 1 },
    KindSpec { kind: ComponentKind::Photodiode, name: "Photodiode", category: Category::Passive, inputs: 1, outputs: 1 },
    // Active components
    KindSpec { kind: ComponentKind::TransistorNpn, name: "NPN Transistor", category: Category::Active, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::TransistorPnp, name: "PNP Transistor", category: Category::Active, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::MosfetN, name: "N-Channel MOSFET", category: Category::Active, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::MosfetP, name: "P-Channel MOSFET", category: Category::Active, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::OpAmp, name: "Op-Amp", category: Category::Active, inputs: 2, outputs: 1 },
    KindSpec { kind: ComponentKind::Relay, name: "Relay", category: Category::Active, inputs: 1, outputs: 1 },
    // Power
    KindSpec { kind: ComponentKind::Battery, name: "Battery", category: Category::Power, inputs: 0, outputs: 1 },
    KindSpec { kind: ComponentKind::Ground, name: "Ground", category: Category::Power, inputs: 1, outputs: 0 },
    KindSpec { kind: ComponentKind::Vcc, name: "VCC", category: Category::Power, inputs: 0, outputs: 1 },
    // Integrated circuits
    KindSpec { kind: ComponentKind::Ic555, name: "555 Timer", category: Category::Ic, inputs: 3, outputs: 1 },
    KindSpec { kind: ComponentKind::Ic, name: "Generic IC", category: Category::Ic, inputs: 4, outputs: 4 },
];

/// Returns every palette entry in drawer order.
pub fn all() -> &'static [KindSpec] {
    PALETTE
}

/// Looks up the palette entry for a kind.
pub fn spec(kind: &ComponentKind) -> Option<&'static KindSpec> {
    PALETTE.iter().find(|s| &s.kind == kind)
}

/// Returns `(inputs, outputs)` for a kind, if it is in the palette.
pub fn pin_counts(kind: &ComponentKind) -> Option<(usize, usize)> {
    spec(kind).map(|s| (s.inputs, s.outputs))
}

/// Iterates the palette entries of one category.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static KindSpec> {
    PALETTE.iter().filter(move |s| s.category == category)
}
