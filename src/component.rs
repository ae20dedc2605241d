//! Component definitions: the static description of one circuit element.
//!
//! A [`Component`] carries identity, placement and pin counts but no
//! behavior. Behavior is selected by its [`ComponentKind`] and implemented
//! in the evaluator; sequential state lives in the simulation session's
//! state arena, never on the component itself.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::palette;
use crate::types::{ComponentId, Value};

/// The kind of a component, selecting its evaluation semantics.
///
/// Kinds serialize as the short string tags used by circuit documents
/// (`"and"`, `"dff"`, `"transistor-npn"`, ...). Tags not in the palette
/// deserialize to [`ComponentKind::Other`] so documents from newer
/// editors still load; unknown kinds evaluate to all-zero outputs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    // Logic gates
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    // Input/output
    Input,
    Output,
    Led,
    Clock,
    Switch,
    Button,
    Buzzer,
    Lamp,
    Motor,
    Display7Seg,
    // Flip-flops
    Dff,
    Tff,
    Jkff,
    Srff,
    // Multiplexers
    Mux2,
    Mux4,
    Demux2,
    Demux4,
    // Encoders/decoders
    Decoder2,
    Decoder3,
    Encoder4,
    Encoder8,
    // Sequential
    Counter4,
    Register4,
    ShiftRegister,
    // Passive
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    ZenerDiode,
    Photodiode,
    // Active
    TransistorNpn,
    TransistorPnp,
    MosfetN,
    MosfetP,
    OpAmp,
    Relay,
    // Power
    Battery,
    Ground,
    Vcc,
    // Integrated circuits
    Ic555,
    Ic,
    /// A kind this engine does not know about.
    Other(String),
}

impl ComponentKind {
    /// Returns the string tag used in circuit documents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::Xor => "xor",
            Self::Xnor => "xnor",
            Self::Input => "input",
            Self::Output => "output",
            Self::Led => "led",
            Self::Clock => "clock",
            Self::Switch => "switch",
            Self::Button => "button",
            Self::Buzzer => "buzzer",
            Self::Lamp => "lamp",
            Self::Motor => "motor",
            Self::Display7Seg => "display7seg",
            Self::Dff => "dff",
            Self::Tff => "tff",
            Self::Jkff => "jkff",
            Self::Srff => "srff",
            Self::Mux2 => "mux2",
            Self::Mux4 => "mux4",
            Self::Demux2 => "demux2",
            Self::Demux4 => "demux4",
            Self::Decoder2 => "decoder2",
            Self::Decoder3 => "decoder3",
            Self::Encoder4 => "encoder4",
            Self::Encoder8 => "encoder8",
            Self::Counter4 => "counter4",
            Self::Register4 => "register4",
            Self::ShiftRegister => "shiftregister",
            Self::Resistor => "resistor",
            Self::Capacitor => "capacitor",
            Self::Inductor => "inductor",
            Self::Diode => "diode",
            Self::ZenerDiode => "zenerdiode",
            Self::Photodiode => "photodiode",
            Self::TransistorNpn => "transistor-npn",
            Self::TransistorPnp => "transistor-pnp",
            Self::MosfetN => "mosfet-n",
            Self::MosfetP => "mosfet-p",
            Self::OpAmp => "opamp",
            Self::Relay => "relay",
            Self::Battery => "battery",
            Self::Ground => "ground",
            Self::Vcc => "vcc",
            Self::Ic555 => "ic555",
            Self::Ic => "ic",
            Self::Other(tag) => tag,
        }
    }

    /// Parses a string tag into a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "nand" => Self::Nand,
            "nor" => Self::Nor,
            "xor" => Self::Xor,
            "xnor" => Self::Xnor,
            "input" => Self::Input,
            "output" => Self::Output,
            "led" => Self::Led,
            "clock" => Self::Clock,
            "switch" => Self::Switch,
            "button" => Self::Button,
            "buzzer" => Self::Buzzer,
            "lamp" => Self::Lamp,
            "motor" => Self::Motor,
            "display7seg" => Self::Display7Seg,
            "dff" => Self::Dff,
            "tff" => Self::Tff,
            "jkff" => Self::Jkff,
            "srff" => Self::Srff,
            "mux2" => Self::Mux2,
            "mux4" => Self::Mux4,
            "demux2" => Self::Demux2,
            "demux4" => Self::Demux4,
            "decoder2" => Self::Decoder2,
            "decoder3" => Self::Decoder3,
            "encoder4" => Self::Encoder4,
            "encoder8" => Self::Encoder8,
            "counter4" => Self::Counter4,
            "register4" => Self::Register4,
            "shiftregister" => Self::ShiftRegister,
            "resistor" => Self::Resistor,
            "capacitor" => Self::Capacitor,
            "inductor" => Self::Inductor,
            "diode" => Self::Diode,
            "zenerdiode" => Self::ZenerDiode,
            "photodiode" => Self::Photodiode,
            "transistor-npn" => Self::TransistorNpn,
            "transistor-pnp" => Self::TransistorPnp,
            "mosfet-n" => Self::MosfetN,
            "mosfet-p" => Self::MosfetP,
            "opamp" => Self::OpAmp,
            "relay" => Self::Relay,
            "battery" => Self::Battery,
            "ground" => Self::Ground,
            "vcc" => Self::Vcc,
            "ic555" => Self::Ic555,
            "ic" => Self::Ic,
            other => Self::Other(other.to_string()),
        }
    }

    /// True for externally driven source kinds whose output is their
    /// set level rather than a function of wired inputs.
    pub fn is_user_driven(&self) -> bool {
        matches!(self, Self::Input | Self::Switch | Self::Button)
    }

    /// True for sink kinds that latch their input for display and drive
    /// no outputs.
    pub fn is_sink(&self) -> bool {
        matches!(self, Self::Buzzer | Self::Lamp | Self::Motor | Self::Display7Seg)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ComponentKind {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = ComponentKind;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a component kind tag")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ComponentKind, E> {
                Ok(ComponentKind::from_tag(v))
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}

/// One placed circuit element.
///
/// `x`/`y` are canvas coordinates kept for round-tripping documents; the
/// evaluator ignores them. `propagation_delay` is likewise carried as
/// metadata only. `label` doubles as the component's signal series name
/// in the recorded waveform.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Unique identifier within the circuit.
    pub id: ComponentId,
    /// Evaluation semantics selector.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Canvas position, layout only.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Display name; key of this component's waveform series.
    pub label: String,
    /// Number of input pins.
    #[serde(default)]
    pub inputs: usize,
    /// Number of output pins.
    #[serde(default)]
    pub outputs: usize,
    /// Externally set level for user-driven sources (input/switch/button).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Accepted as circuit metadata; not consumed by evaluation order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propagation_delay: Option<Value>,
}

impl Component {
    /// Creates a component with pin counts taken from the palette.
    ///
    /// Unknown kinds get zero pins; use [`Component::with_pins`] to size
    /// them explicitly.
    pub fn new(
        id: impl Into<ComponentId>,
        kind: ComponentKind,
        label: impl Into<String>,
    ) -> Self {
        let (inputs, outputs) = palette::pin_counts(&kind).unwrap_or((0, 0));
        Self {
            id: id.into(),
            kind,
            x: 0.0,
            y: 0.0,
            label: label.into(),
            inputs,
            outputs,
            value: None,
            propagation_delay: None,
        }
    }

    /// Overrides the palette's default pin counts.
    pub fn with_pins(mut self, inputs: usize, outputs: usize) -> Self {
        self.inputs = inputs;
        self.outputs = outputs;
        self
    }

    /// Sets the canvas position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the externally driven level.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// The externally set level, coerced to a number (0 when unset).
    pub fn level(&self) -> Value {
        self.value.unwrap_or(0.0)
    }
}
