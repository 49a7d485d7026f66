use rand::Rng;

use crate::error::{Error, Result};
use crate::vector::Vector;

/// Logistic activation: `1 / (1 + e^-x)`.
#[inline]
pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Activations feeding a layer: the raw network input for the first hidden
/// layer, the previous layer's neuron outputs everywhere else.
#[derive(Clone, Copy)]
pub enum LayerInput<'a> {
    Values(&'a Vector),
    Neurons(&'a [Neuron]),
}

impl LayerInput<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            LayerInput::Values(v) => v.len(),
            LayerInput::Neurons(n) => n.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Activation of source unit `i`.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        match self {
            LayerInput::Values(v) => v[i],
            LayerInput::Neurons(n) => n[i].output(),
        }
    }
}

/// A single sigmoid unit with one weight and one momentum delta per input.
///
/// `output` and `error` are scratch values: the forward pass writes `output`,
/// the backward pass writes `error` and consumes both. Only weights, deltas,
/// and bias are trainable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vector,
    delta_weights: Vector,
    bias: f64,
    output: f64,
    error: f64,
}

impl Neuron {
    /// Creates a neuron with `inputs` weights, everything zeroed.
    pub fn new(inputs: usize) -> Self {
        Self {
            weights: Vector::filled(inputs, 0.0),
            delta_weights: Vector::filled(inputs, 0.0),
            bias: 0.0,
            output: 0.0,
            error: 0.0,
        }
    }

    /// Rebuilds a neuron from persisted state; per-pass values start cleared.
    ///
    /// The momentum deltas must line up with the weights one to one.
    pub(crate) fn from_parts(weights: Vector, delta_weights: Vector, bias: f64) -> Result<Self> {
        if weights.len() != delta_weights.len() {
            return Err(Error::SizeMismatch(format!(
                "neuron has {} weights but {} momentum deltas",
                weights.len(),
                delta_weights.len()
            )));
        }
        Ok(Self {
            weights,
            delta_weights,
            bias,
            output: 0.0,
            error: 0.0,
        })
    }

    /// Re-rolls the trainable state: weights uniform in `[-1, 1)` divided by
    /// `scale`, bias uniform in `[0, 1)`, momentum deltas and per-pass values
    /// cleared.
    pub(crate) fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, scale: f64) {
        for w in self.weights.as_mut_slice() {
            *w = rng.gen_range(-1.0..1.0) / scale;
        }
        for d in self.delta_weights.as_mut_slice() {
            *d = 0.0;
        }
        self.bias = rng.gen_range(0.0..1.0);
        self.output = 0.0;
        self.error = 0.0;
    }

    /// Forward step: `output = sigmoid(weights · source + bias)`.
    #[inline]
    pub(crate) fn feed(&mut self, source: LayerInput<'_>) {
        debug_assert_eq!(source.len(), self.weights.len());

        let mut sum = self.bias;
        for i in 0..self.weights.len() {
            sum += self.weights[i] * source.get(i);
        }
        self.output = sigmoid(sum);
    }

    #[inline]
    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn weights(&self) -> &Vector {
        &self.weights
    }

    #[inline]
    pub fn weights_mut(&mut self) -> &mut Vector {
        &mut self.weights
    }

    #[inline]
    pub fn delta_weights(&self) -> &Vector {
        &self.delta_weights
    }

    #[inline]
    pub fn delta_weights_mut(&mut self) -> &mut Vector {
        &mut self.delta_weights
    }

    /// Mutable views of the weights and momentum deltas at once, for update
    /// rules that walk both in lockstep.
    #[inline]
    pub fn weights_and_deltas_mut(&mut self) -> (&mut Vector, &mut Vector) {
        (&mut self.weights, &mut self.delta_weights)
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    #[inline]
    pub(crate) fn set_output(&mut self, output: f64) {
        self.output = output;
    }

    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    #[inline]
    pub(crate) fn set_error(&mut self, error: f64) {
        self.error = error;
    }
}
