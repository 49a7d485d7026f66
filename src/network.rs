//! Feed-forward sigmoid network trained by backpropagation with momentum.
//!
//! A [`Network`] is built from a [`Topology`] and an explicit random source,
//! so two networks constructed from the same seed are bit-identical. The
//! input layer is not materialized as neurons; the bound input vector feeds
//! the first hidden layer directly.
//!
//! The backward pass updates as it goes: the output layer's weights are
//! adjusted first, and each hidden layer's error signals are then computed
//! from the already-updated layer above it.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cost::Cost;
use crate::error::{Error, Result};
use crate::neuron::{LayerInput, Neuron};
use crate::topology::Topology;
use crate::update::{Momentum, WeightUpdate};
use crate::vector::Vector;

/// Learning rate used when a caller has no opinion.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Momentum coefficient used when a caller has no opinion.
pub const DEFAULT_MOMENTUM: f64 = 0.5;

/// Multi-layer perceptron with per-neuron momentum state.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    learning_rate: f64,
    momentum: f64,
    input: Vector,
    /// Hidden and output layers; the input layer has no neurons.
    layers: Vec<Vec<Neuron>>,
    update_rule: Arc<dyn WeightUpdate>,
}

impl Network {
    /// Builds a network with weights drawn from `rng`.
    ///
    /// Weights start uniform in `[-1, 1)` divided by the square root of the
    /// network's total weight count; biases start uniform in `[0, 1)`.
    pub fn new_with_rng<R: Rng + ?Sized>(
        topology: Topology,
        learning_rate: f64,
        momentum: f64,
        rng: &mut R,
    ) -> Self {
        let mut layers = Vec::with_capacity(topology.layers() - 1);
        for l in 1..topology.layers() {
            let layer: Vec<Neuron> = (0..topology.size(l))
                .map(|_| Neuron::new(topology.size(l - 1)))
                .collect();
            layers.push(layer);
        }
        let input = Vector::filled(topology.inputs(), 0.0);

        let mut network = Self {
            topology,
            learning_rate,
            momentum,
            input,
            layers,
            update_rule: Arc::new(Momentum),
        };
        network.reshuffle_weights(rng);
        network
    }

    /// Convenience over [`Network::new_with_rng`] with a deterministic seed.
    pub fn new_with_seed(
        topology: Topology,
        learning_rate: f64,
        momentum: f64,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(topology, learning_rate, momentum, &mut rng)
    }

    /// Swaps in a different weight-update strategy.
    #[must_use]
    pub fn with_update_rule(mut self, rule: Arc<dyn WeightUpdate>) -> Self {
        self.update_rule = rule;
        self
    }

    /// Rebuilds a network from persisted state with the default momentum
    /// update rule. Shape consistency is the caller's responsibility.
    pub(crate) fn from_parts(
        topology: Topology,
        learning_rate: f64,
        momentum: f64,
        input: Vector,
        layers: Vec<Vec<Neuron>>,
    ) -> Self {
        debug_assert_eq!(layers.len() + 1, topology.layers());
        Self {
            topology,
            learning_rate,
            momentum,
            input,
            layers,
            update_rule: Arc::new(Momentum),
        }
    }

    /// Re-rolls every neuron's weights and bias from `rng` and clears all
    /// momentum state, as on construction.
    pub fn reshuffle_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let scale = (self.topology.weight_count() as f64).sqrt();
        for layer in &mut self.layers {
            for neuron in layer {
                neuron.randomize(rng, scale);
            }
        }
    }

    /// Binds `input` as the network's current input.
    ///
    /// Fails with [`Error::SizeMismatch`] before touching any state if
    /// `input` does not match the topology's input width.
    pub fn set_input(&mut self, input: &Vector) -> Result<()> {
        if input.len() != self.topology.inputs() {
            return Err(Error::SizeMismatch(format!(
                "input len {} does not match network input width {}",
                input.len(),
                self.topology.inputs()
            )));
        }
        self.input = input.clone();
        Ok(())
    }

    /// Runs one forward evaluation of every layer against the bound input.
    ///
    /// Pure recomputation of the neurons' `output` fields; no error path.
    pub fn feed_forward(&mut self) {
        for l in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(l);
            let source = match done.last() {
                Some(prev) => LayerInput::Neurons(prev),
                None => LayerInput::Values(&self.input),
            };
            for neuron in &mut rest[0] {
                neuron.feed(source);
            }
        }
    }

    /// Copies the output layer's activations into a fresh vector.
    pub fn copy_output(&self) -> Vector {
        match self.layers.last() {
            Some(layer) => layer.iter().map(Neuron::output).collect(),
            None => Vector::new(),
        }
    }

    /// One backward pass against `target` using the squared-error seeding
    /// policy, then a full weight update sweep.
    ///
    /// Fails with [`Error::SizeMismatch`] before touching any state if
    /// `target` does not match the output width.
    pub fn back_propagate(&mut self, target: &Vector) -> Result<()> {
        self.back_propagate_with(target, &Cost::MeanSquared)
    }

    /// One backward pass with the error seed chosen by `cost`'s policy.
    pub fn back_propagate_with(&mut self, target: &Vector, cost: &Cost) -> Result<()> {
        let errors = cost.output_errors(&self.copy_output(), target)?;
        self.seed_output_errors(&errors)?;
        self.update_weights();
        Ok(())
    }

    /// Assigns the output layer's error signals, one per output neuron.
    ///
    /// Callers pick the seeding policy (see [`Cost::output_errors`]); the
    /// sweep itself is [`Network::update_weights`].
    pub fn seed_output_errors(&mut self, errors: &Vector) -> Result<()> {
        if errors.len() != self.topology.outputs() {
            return Err(Error::SizeMismatch(format!(
                "error seed len {} does not match network output width {}",
                errors.len(),
                self.topology.outputs()
            )));
        }
        if let Some(layer) = self.layers.last_mut() {
            for (i, neuron) in layer.iter_mut().enumerate() {
                neuron.set_error(errors[i]);
            }
        }
        Ok(())
    }

    /// Backward sweep over all layers, output to innermost hidden.
    ///
    /// The output layer is updated from its seeded errors first. Each hidden
    /// layer's errors are then derived from the layer above it, reading that
    /// layer's already-updated weights, before its own update is applied.
    pub fn update_weights(&mut self) {
        let rule = Arc::clone(&self.update_rule);
        for l in (0..self.layers.len()).rev() {
            let (up_to_current, next) = self.layers.split_at_mut(l + 1);
            if let Some(next_layer) = next.first() {
                propagate_errors(&mut up_to_current[l], next_layer);
            }

            let (before, current) = up_to_current.split_at_mut(l);
            let source = match before.last() {
                Some(prev) => LayerInput::Neurons(prev),
                None => LayerInput::Values(&self.input),
            };
            for neuron in &mut current[0] {
                rule.update(neuron, source, self.learning_rate, self.momentum);
            }
        }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.topology.inputs()
    }

    #[inline]
    pub fn output_size(&self) -> usize {
        self.topology.outputs()
    }

    /// Last bound input vector.
    #[inline]
    pub fn input(&self) -> &Vector {
        &self.input
    }

    /// Hidden and output layers, innermost first.
    #[inline]
    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[inline]
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    #[inline]
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    #[inline]
    pub fn set_momentum(&mut self, momentum: f64) {
        self.momentum = momentum;
    }
}

/// Hidden-layer error signals from the (already updated) next layer.
///
/// For neuron `i`: `error = o*(1-o) * (Σ_k next[k].error * next[k].weights[i]
/// + next[last].error * next[last].bias)`. The bias term enters the sum once,
/// for the last neuron of the next layer only.
fn propagate_errors(layer: &mut [Neuron], next: &[Neuron]) {
    for (i, neuron) in layer.iter_mut().enumerate() {
        let mut sum = 0.0;
        for n in next {
            sum += n.error() * n.weights()[i];
        }
        if let Some(last) = next.last() {
            sum += last.error() * last.bias();
        }
        let o = neuron.output();
        neuron.set_error(o * (1.0 - o) * sum);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::cost::mean_squared_error;
    use crate::neuron::sigmoid;

    fn topology(sizes: &[usize]) -> Topology {
        Topology::new(sizes.to_vec()).unwrap()
    }

    #[test]
    fn layer_shapes_follow_topology() {
        let net = Network::new_with_seed(topology(&[3, 4, 2]), 0.1, 0.5, 1);

        assert_eq!(net.layers().len(), 2);
        assert_eq!(net.layers()[0].len(), 4);
        assert_eq!(net.layers()[1].len(), 2);
        for neuron in &net.layers()[0] {
            assert_eq!(neuron.weight_count(), 3);
        }
        for neuron in &net.layers()[1] {
            assert_eq!(neuron.weight_count(), 4);
        }
        assert_eq!(net.input().len(), 3);
        assert_eq!(net.input_size(), 3);
        assert_eq!(net.output_size(), 2);
    }

    #[test]
    fn same_seed_gives_bit_identical_networks() {
        let a = Network::new_with_seed(topology(&[2, 3, 1]), 0.1, 0.5, 7);
        let b = Network::new_with_seed(topology(&[2, 3, 1]), 0.1, 0.5, 7);
        assert_eq!(a.layers(), b.layers());

        let mut a = a;
        let mut b = b;
        let probe = Vector::from(vec![0.3, -0.8]);
        a.set_input(&probe).unwrap();
        a.feed_forward();
        b.set_input(&probe).unwrap();
        b.feed_forward();
        assert_eq!(a.copy_output()[0].to_bits(), b.copy_output()[0].to_bits());
    }

    #[test]
    fn initial_weights_respect_scale() {
        // weight_count([2,3,1]) = 9, so weights land in [-1/3, 1/3).
        let net = Network::new_with_seed(topology(&[2, 3, 1]), 0.1, 0.5, 11);
        for layer in net.layers() {
            for neuron in layer {
                for &w in neuron.weights().iter() {
                    assert!(w.abs() <= 1.0 / 3.0, "weight {w} out of scale");
                }
                assert!((0.0..1.0).contains(&neuron.bias()));
                assert!(neuron.delta_weights().iter().all(|&d| d == 0.0));
            }
        }
    }

    #[test]
    fn set_input_rejects_wrong_width_and_leaves_state_alone() {
        let mut net = Network::new_with_seed(topology(&[2, 2, 1]), 0.1, 0.5, 3);
        let before = net.clone();

        let res = net.set_input(&Vector::from(vec![1.0, 2.0, 3.0]));
        assert!(matches!(res, Err(Error::SizeMismatch(_))));
        assert_eq!(net.layers(), before.layers());
        assert_eq!(net.input(), before.input());
    }

    #[test]
    fn feed_forward_matches_hand_rolled_math() {
        let mut net = Network::new_with_seed(topology(&[1, 1, 1]), 0.1, 0.5, 5);
        *net.layers[0][0].weights_mut() = Vector::from(vec![0.5]);
        net.layers[0][0].set_bias(-0.25);
        *net.layers[1][0].weights_mut() = Vector::from(vec![2.0]);
        net.layers[1][0].set_bias(0.125);

        net.set_input(&Vector::from(vec![1.5])).unwrap();
        net.feed_forward();

        let hidden = sigmoid(0.5 * 1.5 - 0.25);
        let expected = sigmoid(2.0 * hidden + 0.125);
        assert!((net.copy_output()[0] - expected).abs() < 1e-15);
    }

    /// Update rule that records each neuron's error at update time and
    /// changes nothing, exposing sweep order and the hidden error formula.
    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<f64>>);

    impl WeightUpdate for Recorder {
        fn update(&self, neuron: &mut Neuron, _source: LayerInput<'_>, _lr: f64, _m: f64) {
            self.0.lock().unwrap().push(neuron.error());
        }
    }

    #[test]
    fn sweep_updates_output_layer_first_and_adds_last_neuron_bias_term() {
        let recorder = Arc::new(Recorder::default());
        let mut net = Network::new_with_seed(topology(&[1, 1, 2]), 0.1, 0.5, 1)
            .with_update_rule(recorder.clone());

        // Hidden output forced to sigmoid(0) = 0.5.
        *net.layers[0][0].weights_mut() = Vector::from(vec![0.0]);
        net.layers[0][0].set_bias(0.0);
        *net.layers[1][0].weights_mut() = Vector::from(vec![1.0]);
        net.layers[1][0].set_bias(0.0);
        *net.layers[1][1].weights_mut() = Vector::from(vec![2.0]);
        net.layers[1][1].set_bias(0.5);

        net.set_input(&Vector::from(vec![0.0])).unwrap();
        net.feed_forward();
        net.seed_output_errors(&Vector::from(vec![0.25, -0.5])).unwrap();
        net.update_weights();

        let seen = recorder.0.lock().unwrap();
        assert_eq!(seen.len(), 3);
        // Output layer first, in order, with the seeded errors.
        assert_eq!(seen[0], 0.25);
        assert_eq!(seen[1], -0.5);
        // Hidden error: 0.5*0.5 * (0.25*1.0 + (-0.5)*2.0 + (-0.5)*0.5),
        // the bias product counted for the last output neuron only.
        assert!((seen[2] - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn repeated_back_propagation_reduces_cost() {
        let mut net = Network::new_with_seed(
            topology(&[2, 3, 1]),
            DEFAULT_LEARNING_RATE,
            DEFAULT_MOMENTUM,
            42,
        );
        let input = Vector::from(vec![1.0, 0.0]);
        let target = Vector::from(vec![1.0]);

        net.set_input(&input).unwrap();
        net.feed_forward();
        let before = mean_squared_error(&net.copy_output(), &target).unwrap();

        for _ in 0..500 {
            net.feed_forward();
            net.back_propagate(&target).unwrap();
        }
        net.feed_forward();
        let after = mean_squared_error(&net.copy_output(), &target).unwrap();

        assert!(
            after < before * 0.5,
            "cost did not drop: {before} -> {after}"
        );
    }

    #[test]
    fn back_propagate_rejects_wrong_target_len() {
        let mut net = Network::new_with_seed(topology(&[2, 2, 2]), 0.1, 0.5, 2);
        net.set_input(&Vector::from(vec![0.5, 0.5])).unwrap();
        net.feed_forward();
        let before = net.clone();

        let res = net.back_propagate(&Vector::from(vec![1.0]));
        assert!(matches!(res, Err(Error::SizeMismatch(_))));
        assert_eq!(net.layers(), before.layers());
    }

    #[test]
    fn reshuffle_clears_momentum_state() {
        let mut net = Network::new_with_seed(topology(&[2, 2, 1]), 0.4, 0.9, 17);
        net.set_input(&Vector::from(vec![1.0, 1.0])).unwrap();
        net.feed_forward();
        net.back_propagate(&Vector::from(vec![0.0])).unwrap();
        assert!(net
            .layers()
            .iter()
            .flatten()
            .any(|n| n.delta_weights().iter().any(|&d| d != 0.0)));

        let mut rng = StdRng::seed_from_u64(99);
        net.reshuffle_weights(&mut rng);
        for neuron in net.layers().iter().flatten() {
            assert!(neuron.delta_weights().iter().all(|&d| d == 0.0));
            assert_eq!(neuron.error(), 0.0);
        }
    }

    #[test]
    fn rate_and_momentum_are_adjustable() {
        let mut net = Network::new_with_seed(topology(&[2, 2, 1]), 0.1, 0.5, 1);
        net.set_learning_rate(0.4);
        net.set_momentum(0.9);
        assert_eq!(net.learning_rate(), 0.4);
        assert_eq!(net.momentum(), 0.9);
    }
}
