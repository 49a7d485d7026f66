//! Pluggable weight-update strategies.

use std::fmt;

use crate::neuron::{LayerInput, Neuron};

/// Strategy applied to a neuron once its error signal is known.
///
/// The backward pass computes `error` for every neuron, then hands each
/// neuron and the activations that fed it to the update rule. A rule is free
/// to adjust weights, momentum deltas, and bias however it likes; the
/// network applies it layer by layer from the output backwards.
pub trait WeightUpdate: fmt::Debug + Send + Sync {
    fn update(
        &self,
        neuron: &mut Neuron,
        source: LayerInput<'_>,
        learning_rate: f64,
        momentum: f64,
    );
}

/// Classic backpropagation step with momentum.
///
/// With `e` the neuron error, `x` the source activations, and `d` the stored
/// deltas: `d[i] = x[i]*e*lr + e*m*d[i]`, then `w[i] += d[i]`. The bias is
/// replaced, not accumulated: `bias = e*lr + e*m*bias`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Momentum;

impl WeightUpdate for Momentum {
    fn update(
        &self,
        neuron: &mut Neuron,
        source: LayerInput<'_>,
        learning_rate: f64,
        momentum: f64,
    ) {
        let lr_err = neuron.error() * learning_rate;
        let m_err = neuron.error() * momentum;

        let (weights, deltas) = neuron.weights_and_deltas_mut();
        for i in 0..weights.len() {
            deltas[i] = source.get(i) * lr_err + m_err * deltas[i];
            weights[i] += deltas[i];
        }
        neuron.set_bias(lr_err + m_err * neuron.bias());
    }
}
