//! Canonical text persistence for networks.
//!
//! The format is a flat stream of whitespace-separated tokens in fixed
//! order: the `mlp` tag, learning rate, momentum, `inputs` plus the encoded
//! input vector, `topology` plus the encoded layer widths, then per layer a
//! `layer` tag and per neuron a `neuron` tag followed by bias, weights, and
//! momentum deltas. Values use Rust's round-trip-safe `f64` formatting, so
//! save-then-load reproduces every parameter bit for bit.
//!
//! Writing is pure formatting and cannot fail; the stream and file wrappers
//! fold I/O failures into [`Error::InvalidFormat`]. Loading consumes exactly
//! the grammar and ignores anything after it, so a network can be embedded
//! in a larger stream.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::network::Network;
use crate::neuron::Neuron;
use crate::topology::Topology;
use crate::vector::Vector;

const NETWORK_TAG: &str = "mlp";
const INPUTS_TAG: &str = "inputs";
const TOPOLOGY_TAG: &str = "topology";
const LAYER_TAG: &str = "layer";
const NEURON_TAG: &str = "neuron";

/// Whitespace token scanner over an in-memory text stream.
pub(crate) struct TokenReader<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> TokenReader<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace(),
        }
    }

    fn next_token(&mut self) -> Result<&'a str> {
        self.tokens
            .next()
            .ok_or_else(|| Error::InvalidFormat("unexpected end of stream".to_owned()))
    }

    fn expect_tag(&mut self, tag: &str) -> Result<()> {
        let token = self.next_token()?;
        if token != tag {
            return Err(Error::InvalidFormat(format!(
                "expected tag `{tag}`, found `{token}`"
            )));
        }
        Ok(())
    }

    fn read_f64(&mut self) -> Result<f64> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| Error::InvalidFormat(format!("`{token}` is not a number")))
    }

    fn read_usize(&mut self) -> Result<usize> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| Error::InvalidFormat(format!("`{token}` is not a count")))
    }

    /// Reads a length-prefixed vector, the inverse of [`Vector::write_text`].
    pub(crate) fn read_vector(&mut self) -> Result<Vector> {
        let len = self.read_usize()?;
        let mut values = Vector::new();
        for _ in 0..len {
            values.push(self.read_f64()?);
        }
        Ok(values)
    }

    fn read_topology(&mut self) -> Result<Topology> {
        // The count comes straight from the stream; growing incrementally
        // keeps a hostile value from forcing a giant allocation up front.
        let len = self.read_usize()?;
        let mut sizes = Vec::new();
        for _ in 0..len {
            sizes.push(self.read_usize()?);
        }
        Topology::new(sizes)
    }

    /// Fails with [`Error::InvalidFormat`] unless the stream is exhausted.
    pub(crate) fn finish(&mut self) -> Result<()> {
        match self.tokens.next() {
            Some(token) => Err(Error::InvalidFormat(format!(
                "trailing token `{token}` after the encoded value"
            ))),
            None => Ok(()),
        }
    }
}

fn write_topology(topology: &Topology, out: &mut String) {
    out.push_str(&topology.layers().to_string());
    out.push('\n');
    for &size in topology.as_slice() {
        out.push_str(&size.to_string());
        out.push('\n');
    }
}

fn write_neuron(neuron: &Neuron, out: &mut String) {
    out.push_str(NEURON_TAG);
    out.push('\n');
    out.push_str(&neuron.bias().to_string());
    out.push('\n');
    neuron.weights().write_text(out);
    neuron.delta_weights().write_text(out);
}

fn read_neuron(reader: &mut TokenReader<'_>, expected_inputs: usize) -> Result<Neuron> {
    reader.expect_tag(NEURON_TAG)?;
    let bias = reader.read_f64()?;
    let weights = reader.read_vector()?;
    let delta_weights = reader.read_vector()?;
    if weights.len() != expected_inputs || delta_weights.len() != expected_inputs {
        return Err(Error::InvalidFormat(format!(
            "neuron has {} weights and {} deltas, topology requires {}",
            weights.len(),
            delta_weights.len(),
            expected_inputs
        )));
    }
    Neuron::from_parts(weights, delta_weights, bias)
}

impl Network {
    /// Encodes the network in the canonical text format.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(NETWORK_TAG);
        out.push('\n');
        out.push_str(&self.learning_rate().to_string());
        out.push('\n');
        out.push_str(&self.momentum().to_string());
        out.push('\n');
        out.push_str(INPUTS_TAG);
        out.push('\n');
        self.input().write_text(&mut out);
        out.push_str(TOPOLOGY_TAG);
        out.push('\n');
        write_topology(self.topology(), &mut out);
        for layer in self.layers() {
            out.push_str(LAYER_TAG);
            out.push('\n');
            for neuron in layer {
                write_neuron(neuron, &mut out);
            }
        }
        out
    }

    /// Decodes a network from the canonical text format.
    ///
    /// Layer and neuron shapes are reconstructed from the decoded topology
    /// before the neuron bodies are read; any disagreement between the two
    /// fails with [`Error::InvalidFormat`]. Content after the encoded
    /// network is left unread.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut reader = TokenReader::new(text);
        reader.expect_tag(NETWORK_TAG)?;
        let learning_rate = reader.read_f64()?;
        let momentum = reader.read_f64()?;

        reader.expect_tag(INPUTS_TAG)?;
        let input = reader.read_vector()?;

        reader.expect_tag(TOPOLOGY_TAG)?;
        let topology = reader.read_topology()?;
        if input.len() != topology.inputs() {
            return Err(Error::InvalidFormat(format!(
                "input vector len {} does not match topology input width {}",
                input.len(),
                topology.inputs()
            )));
        }

        let mut layers = Vec::new();
        for l in 1..topology.layers() {
            reader.expect_tag(LAYER_TAG)?;
            // Decoded layer widths are untrusted too; a width bomb must run
            // out of tokens, not overflow a capacity request.
            let mut layer = Vec::new();
            for _ in 0..topology.size(l) {
                layer.push(read_neuron(&mut reader, topology.size(l - 1))?);
            }
            layers.push(layer);
        }

        Ok(Network::from_parts(
            topology,
            learning_rate,
            momentum,
            input,
            layers,
        ))
    }

    /// Writes the text encoding to a stream.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<()> {
        writer
            .write_all(self.to_text().as_bytes())
            .map_err(|e| Error::InvalidFormat(format!("failed to write network: {e}")))
    }

    /// Reads a network's text encoding from a stream.
    pub fn load<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::InvalidFormat(format!("failed to read network: {e}")))?;
        Self::from_text(&text)
    }

    /// Saves the text encoding to a file.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let p = path.as_ref();
        std::fs::write(p, self.to_text())
            .map_err(|e| Error::InvalidFormat(format!("failed to write {}: {e}", p.display())))
    }

    /// Loads a network from a file in the text encoding.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let text = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidFormat(format!("failed to read {}: {e}", p.display())))?;
        Self::from_text(&text)
    }
}
