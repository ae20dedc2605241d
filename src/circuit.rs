//! Circuit documents: wiring, aggregation, validation and persistence.
//!
//! A [`Circuit`] is the unit of save/load — a named aggregate of
//! components and wires, (de)serializable as JSON or YAML with the field
//! names editor-exported circuit documents use.
//!
//! Loading never validates: the evaluator is deliberately lenient and
//! simulates partially built circuits (dangling wires, unwired pins).
//! [`Circuit::validate`] is the opt-in strict check for callers that want
//! to reject malformed documents up front.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::component::Component;
use crate::types::{ComponentId, PinIndex};

/// Errors from circuit loading, saving and validation.
#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown file format: {0}")]
    UnknownFormat(String),
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;

/// One end of a wire: a component and a pin index on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRef {
    pub component_id: ComponentId,
    pub pin_index: PinIndex,
}

impl PinRef {
    /// Creates a pin reference.
    pub fn new(component_id: impl Into<ComponentId>, pin_index: PinIndex) -> Self {
        Self {
            component_id: component_id.into(),
            pin_index,
        }
    }
}

/// A routing waypoint, layout only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub x: f64,
    pub y: f64,
}

/// A connection from an output pin to an input pin.
///
/// At most one wire should drive a given input pin; when several do, the
/// resolver takes the first match in wire list order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wire {
    pub id: String,
    pub from: PinRef,
    pub to: PinRef,
    /// Canvas routing points, irrelevant to evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<WirePoint>>,
}

impl Wire {
    /// Creates a wire between two pins.
    pub fn new(id: impl Into<String>, from: PinRef, to: PinRef) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            points: None,
        }
    }
}

/// A named circuit: the unit of save/load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Circuit {
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub wires: Vec<Wire>,
}

impl Circuit {
    /// Creates an empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            wires: Vec::new(),
        }
    }

    /// Finds a component by id.
    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Loads a circuit from a JSON string.
    pub fn from_json(json: &str) -> CircuitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a circuit from a YAML string.
    pub fn from_yaml(yaml: &str) -> CircuitResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a circuit from a file, auto-detecting the format from the
    /// extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CircuitResult<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Self::from_yaml(&std::fs::read_to_string(path)?),
            "json" => Self::from_json(&std::fs::read_to_string(path)?),
            _ => Err(CircuitError::UnknownFormat(ext.to_string())),
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> CircuitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> CircuitResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Saves as JSON.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> CircuitResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Saves as YAML.
    pub fn to_yaml_file<P: AsRef<Path>>(&self, path: P) -> CircuitResult<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Strict structural check.
    ///
    /// Rejects duplicate component ids, wires referencing missing
    /// components, pin indices outside the declared pin counts, and
    /// several wires driving the same input pin. Duplicate labels only
    /// warn: the evaluator records both components into one series, which
    /// is usually a circuit-authoring mistake but still simulates.
    pub fn validate(&self) -> CircuitResult<()> {
        let mut ids = HashSet::new();
        for comp in &self.components {
            if !ids.insert(comp.id.as_str()) {
                return Err(CircuitError::Validation(format!(
                    "Duplicate component id: {}",
                    comp.id
                )));
            }
        }

        let by_id: HashMap<&str, &Component> =
            self.components.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut driven: HashSet<(&str, PinIndex)> = HashSet::new();
        for wire in &self.wires {
            let from = by_id.get(wire.from.component_id.as_str()).ok_or_else(|| {
                CircuitError::Validation(format!(
                    "Wire {} starts at missing component: {}",
                    wire.id, wire.from.component_id
                ))
            })?;
            let to = by_id.get(wire.to.component_id.as_str()).ok_or_else(|| {
                CircuitError::Validation(format!(
                    "Wire {} ends at missing component: {}",
                    wire.id, wire.to.component_id
                ))
            })?;

            if wire.from.pin_index >= from.outputs {
                return Err(CircuitError::Validation(format!(
                    "Wire {} reads output pin {} of {} which has {} outputs",
                    wire.id, wire.from.pin_index, from.id, from.outputs
                )));
            }
            if wire.to.pin_index >= to.inputs {
                return Err(CircuitError::Validation(format!(
                    "Wire {} drives input pin {} of {} which has {} inputs",
                    wire.id, wire.to.pin_index, to.id, to.inputs
                )));
            }

            if !driven.insert((to.id.as_str(), wire.to.pin_index)) {
                return Err(CircuitError::Validation(format!(
                    "Input pin {} of {} is driven by more than one wire",
                    wire.to.pin_index, to.id
                )));
            }
        }

        let mut labels = HashSet::new();
        for comp in &self.components {
            if !labels.insert(comp.label.as_str()) {
                tracing::warn!(
                    "Duplicate label {:?}: components will share one waveform series",
                    comp.label
                );
            }
        }

        Ok(())
    }
}

/// Builder for assembling circuits programmatically.
///
/// Wires get sequential ids; [`CircuitBuilder::build`] validates the
/// result.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Starts a new named circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::new(name),
        }
    }

    /// Adds a component.
    pub fn add(mut self, component: Component) -> Self {
        self.circuit.components.push(component);
        self
    }

    /// Wires `from_id` output pin `from_pin` to `to_id` input pin `to_pin`.
    pub fn wire(
        mut self,
        from_id: impl Into<ComponentId>,
        from_pin: PinIndex,
        to_id: impl Into<ComponentId>,
        to_pin: PinIndex,
    ) -> Self {
        let id = format!("w{}", self.circuit.wires.len() + 1);
        self.circuit.wires.push(Wire::new(
            id,
            PinRef::new(from_id, from_pin),
            PinRef::new(to_id, to_pin),
        ));
        self
    }

    /// Validates and returns the circuit.
    pub fn build(self) -> CircuitResult<Circuit> {
        self.circuit.validate()?;
        Ok(self.circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentKind;

    fn two_gate_circuit() -> Circuit {
        CircuitBuilder::new("pair")
            .add(Component::new("a", ComponentKind::Input, "A").with_value(1.0))
            .add(Component::new("g", ComponentKind::Not, "G"))
            .wire("a", 0, "g", 0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_assigns_wire_ids() {
        let circuit = two_gate_circuit();
        assert_eq!(circuit.wires.len(), 1);
        assert_eq!(circuit.wires[0].id, "w1");
        assert_eq!(circuit.wires[0].from, PinRef::new("a", 0));
    }

    #[test]
    fn test_json_round_trip() {
        let circuit = two_gate_circuit();
        let json = circuit.to_json().unwrap();
        let back = Circuit::from_json(&json).unwrap();

        assert_eq!(back.name, "pair");
        assert_eq!(back.components.len(), 2);
        assert_eq!(back.components[0].kind, ComponentKind::Input);
        assert_eq!(back.wires[0].to, PinRef::new("g", 0));
    }

    #[test]
    fn test_yaml_round_trip() {
        let circuit = two_gate_circuit();
        let yaml = circuit.to_yaml().unwrap();
        let back = Circuit::from_yaml(&yaml).unwrap();
        assert_eq!(back.components.len(), 2);
        back.validate().unwrap();
    }

    #[test]
    fn test_wire_serde_field_names() {
        let circuit = two_gate_circuit();
        let json: serde_json::Value = serde_json::from_str(&circuit.to_json().unwrap()).unwrap();
        assert_eq!(json["wires"][0]["from"]["componentId"], "a");
        assert_eq!(json["wires"][0]["to"]["pinIndex"], 0);
    }

    #[test]
    fn test_loading_does_not_validate() {
        // A wire to a missing component parses fine; only validate() rejects it
        let json = r#"{
            "name": "partial",
            "components": [
                {"id": "g", "type": "and", "label": "G", "inputs": 2, "outputs": 1}
            ],
            "wires": [
                {"id": "w1",
                 "from": {"componentId": "ghost", "pinIndex": 0},
                 "to": {"componentId": "g", "pinIndex": 0}}
            ]
        }"#;

        let circuit = Circuit::from_json(json).unwrap();
        assert!(matches!(
            circuit.validate(),
            Err(CircuitError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_duplicate_id() {
        let mut circuit = Circuit::new("dup");
        circuit.components.push(Component::new("x", ComponentKind::And, "A"));
        circuit.components.push(Component::new("x", ComponentKind::Or, "B"));
        assert!(circuit.validate().is_err());
    }

    #[test]
    fn test_validate_pin_range() {
        let result = CircuitBuilder::new("range")
            .add(Component::new("a", ComponentKind::Input, "A"))
            .add(Component::new("g", ComponentKind::Not, "G"))
            .wire("a", 0, "g", 5)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_fan_in_conflict() {
        let result = CircuitBuilder::new("conflict")
            .add(Component::new("a", ComponentKind::Input, "A"))
            .add(Component::new("b", ComponentKind::Input, "B"))
            .add(Component::new("g", ComponentKind::Not, "G"))
            .wire("a", 0, "g", 0)
            .wire("b", 0, "g", 0)
            .build();
        assert!(matches!(result, Err(CircuitError::Validation(msg)) if msg.contains("more than one wire")));
    }

    #[test]
    fn test_unknown_file_format() {
        let err = Circuit::from_file("circuit.toml").unwrap_err();
        assert!(matches!(err, CircuitError::UnknownFormat(ext) if ext == "toml"));
    }
}
