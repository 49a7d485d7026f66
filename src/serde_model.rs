//! Versioned JSON snapshot of a network (feature: `serde`).
//!
//! The canonical persistence format is the text encoding in
//! [`text_model`](crate::text_model); this module adds a JSON mirror for
//! tooling that wants a self-describing file. The serialized structs are
//! deliberately separate from the internal types so the file format stays
//! stable if the internals change, and deserialization re-validates every
//! shape and parameter before a `Network` is built.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::network::Network;
use crate::neuron::Neuron;
use crate::topology::Topology;
use crate::vector::Vector;

pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNetwork {
    pub format_version: u32,
    pub learning_rate: f64,
    pub momentum: f64,
    pub input: Vec<f64>,
    pub topology: Vec<usize>,
    pub layers: Vec<Vec<SerializedNeuron>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedNeuron {
    pub bias: f64,
    pub weights: Vec<f64>,
    pub delta_weights: Vec<f64>,
}

impl SerializedNetwork {
    pub fn validate(&self) -> Result<()> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(Error::InvalidFormat(format!(
                "unsupported model format_version {}; expected {}",
                self.format_version, MODEL_FORMAT_VERSION
            )));
        }

        let topology = Topology::new(self.topology.clone())
            .map_err(|e| Error::InvalidFormat(format!("invalid topology: {e}")))?;

        if self.input.len() != topology.inputs() {
            return Err(Error::InvalidFormat(format!(
                "input length {} does not match topology input width {}",
                self.input.len(),
                topology.inputs()
            )));
        }
        if self.layers.len() != topology.layers() - 1 {
            return Err(Error::InvalidFormat(format!(
                "{} layers do not match topology with {} non-input layers",
                self.layers.len(),
                topology.layers() - 1
            )));
        }

        for (l, layer) in self.layers.iter().enumerate() {
            if layer.len() != topology.size(l + 1) {
                return Err(Error::InvalidFormat(format!(
                    "layer {l} has {} neurons, topology requires {}",
                    layer.len(),
                    topology.size(l + 1)
                )));
            }
            let inputs = topology.size(l);
            for (n, neuron) in layer.iter().enumerate() {
                neuron.validate(inputs).map_err(|e| {
                    Error::InvalidFormat(format!("layer {l} neuron {n}: {e}"))
                })?;
            }
        }

        if self.input.iter().any(|v| !v.is_finite())
            || !self.learning_rate.is_finite()
            || !self.momentum.is_finite()
        {
            return Err(Error::InvalidFormat(
                "parameters must contain only finite values".to_owned(),
            ));
        }

        Ok(())
    }
}

impl SerializedNeuron {
    fn validate(&self, inputs: usize) -> Result<()> {
        if self.weights.len() != inputs || self.delta_weights.len() != inputs {
            return Err(Error::InvalidFormat(format!(
                "{} weights and {} deltas do not match input width {}",
                self.weights.len(),
                self.delta_weights.len(),
                inputs
            )));
        }
        if !self.bias.is_finite()
            || self.weights.iter().any(|v| !v.is_finite())
            || self.delta_weights.iter().any(|v| !v.is_finite())
        {
            return Err(Error::InvalidFormat(
                "parameters must contain only finite values".to_owned(),
            ));
        }
        Ok(())
    }
}

impl From<&Network> for SerializedNetwork {
    fn from(network: &Network) -> Self {
        let layers = network
            .layers()
            .iter()
            .map(|layer| layer.iter().map(SerializedNeuron::from).collect())
            .collect();
        Self {
            format_version: MODEL_FORMAT_VERSION,
            learning_rate: network.learning_rate(),
            momentum: network.momentum(),
            input: network.input().as_slice().to_vec(),
            topology: network.topology().as_slice().to_vec(),
            layers,
        }
    }
}

impl From<&Neuron> for SerializedNeuron {
    fn from(neuron: &Neuron) -> Self {
        Self {
            bias: neuron.bias(),
            weights: neuron.weights().as_slice().to_vec(),
            delta_weights: neuron.delta_weights().as_slice().to_vec(),
        }
    }
}

impl TryFrom<SerializedNetwork> for Network {
    type Error = Error;

    fn try_from(value: SerializedNetwork) -> std::result::Result<Self, Self::Error> {
        value.validate()?;

        // validate() already proved the topology is well-formed.
        let topology = Topology::new(value.topology)?;
        let input = Vector::from(value.input);

        let mut layers = Vec::with_capacity(value.layers.len());
        for layer in value.layers {
            let neurons: Result<Vec<Neuron>> = layer
                .into_iter()
                .map(|n| {
                    Neuron::from_parts(
                        Vector::from(n.weights),
                        Vector::from(n.delta_weights),
                        n.bias,
                    )
                })
                .collect();
            layers.push(neurons?);
        }

        Ok(Network::from_parts(
            topology,
            value.learning_rate,
            value.momentum,
            input,
            layers,
        ))
    }
}

impl Network {
    /// Serializes the network to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let ser = SerializedNetwork::from(self);
        serde_json::to_string_pretty(&ser)
            .map_err(|e| Error::InvalidFormat(format!("failed to serialize network: {e}")))
    }

    /// Serializes the network to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let ser = SerializedNetwork::from(self);
        serde_json::to_string(&ser)
            .map_err(|e| Error::InvalidFormat(format!("failed to serialize network: {e}")))
    }

    /// Parses a network from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let ser: SerializedNetwork = serde_json::from_str(s)
            .map_err(|e| Error::InvalidFormat(format!("failed to parse network json: {e}")))?;
        ser.try_into()
    }

    /// Saves the network to a JSON file (pretty-printed).
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        let p = path.as_ref();
        std::fs::write(p, s)
            .map_err(|e| Error::InvalidFormat(format!("failed to write {}: {e}", p.display())))?;
        Ok(())
    }

    /// Loads a network from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidFormat(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&s)
    }
}
