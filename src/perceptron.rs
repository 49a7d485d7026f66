//! Single-neuron classifier trained by the classic delta rule.
//!
//! A [`Perceptron`] is the degenerate one-unit network: a weight per input,
//! a bias, and a sigmoid activation that a step threshold turns into a hard
//! 0/1 decision. Unlike [`Network`](crate::network::Network) it starts from
//! zeroed weights, so training on separable data is deterministic without a
//! seed.

use rand::Rng;

use crate::data::TrainingSet;
use crate::error::{Error, Result};
use crate::neuron::sigmoid;
use crate::vector::Vector;

/// Step threshold applied to the activation when a caller has no opinion.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// One sigmoid unit with a step threshold on its activation.
#[derive(Debug, Clone)]
pub struct Perceptron {
    weights: Vector,
    bias: f64,
    learning_rate: f64,
    threshold: f64,
    input: Vector,
    output: f64,
}

impl Perceptron {
    /// Creates a perceptron with `inputs` weights, all state zeroed.
    pub fn new(inputs: usize, learning_rate: f64, threshold: f64) -> Self {
        Self {
            weights: Vector::filled(inputs, 0.0),
            bias: 0.0,
            learning_rate,
            threshold,
            input: Vector::filled(inputs, 0.0),
            output: 0.0,
        }
    }

    /// Re-rolls the weights uniform in `[-1, 1)` divided by the square root
    /// of the input width, and the bias uniform in `[0, 1)`.
    pub fn reshuffle_weights<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let scale = (self.weights.len() as f64).sqrt();
        for w in self.weights.as_mut_slice() {
            *w = rng.gen_range(-1.0..1.0) / scale;
        }
        self.bias = rng.gen_range(0.0..1.0);
        self.output = 0.0;
    }

    /// Binds `input`; fails with [`Error::SizeMismatch`] on the wrong width.
    pub fn set_input(&mut self, input: &Vector) -> Result<()> {
        if input.len() != self.weights.len() {
            return Err(Error::SizeMismatch(format!(
                "input len {} does not match perceptron input width {}",
                input.len(),
                self.weights.len()
            )));
        }
        self.input = input.clone();
        Ok(())
    }

    /// Recomputes the activation: `sigmoid(weights · input + bias)`.
    pub fn feed_forward(&mut self) {
        let mut sum = self.bias;
        for i in 0..self.weights.len() {
            sum += self.weights[i] * self.input[i];
        }
        self.output = sigmoid(sum);
    }

    /// Last computed activation, in `(0, 1)`.
    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Hard decision: `1.0` if the activation reaches the threshold.
    #[inline]
    pub fn sharp_output(&self) -> f64 {
        if self.output >= self.threshold {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    pub fn weights(&self) -> &Vector {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[inline]
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    /// One delta-rule step on a single sample. `target` must be a width-1
    /// vector. Returns the squared error of the sharp output.
    ///
    /// With `e = target - sharp_output`: `wᵢ += lr·e·xᵢ`, `bias += lr·e`.
    pub fn train(&mut self, input: &Vector, target: &Vector) -> Result<f64> {
        if target.len() != 1 {
            return Err(Error::SizeMismatch(format!(
                "perceptron target must have len 1, got {}",
                target.len()
            )));
        }
        self.set_input(input)?;
        self.feed_forward();

        let e = target[0] - self.sharp_output();
        let step = self.learning_rate * e;
        for i in 0..self.weights.len() {
            self.weights[i] += step * self.input[i];
        }
        self.bias += step;
        Ok(e * e)
    }

    /// Trains on the whole set for up to `max_epochs` epochs, stopping early
    /// when an epoch's summed squared error drops below `min_error`.
    ///
    /// Returns the epoch reached, `max_epochs` when the run went the
    /// distance: the same convention as
    /// [`Trainer::run_training`](crate::trainer::Trainer::run_training).
    pub fn run_training(
        &mut self,
        set: &TrainingSet,
        max_epochs: usize,
        min_error: f64,
    ) -> Result<usize> {
        if set.input_dim() != self.weights.len() {
            return Err(Error::SizeMismatch(format!(
                "set input width {} does not match perceptron input width {}",
                set.input_dim(),
                self.weights.len()
            )));
        }
        if set.target_dim() != 1 {
            return Err(Error::SizeMismatch(format!(
                "set target width {} does not match perceptron output width 1",
                set.target_dim()
            )));
        }

        for epoch in 0..max_epochs {
            let mut epoch_error = 0.0;
            for (input, target) in set.samples() {
                epoch_error += self.train(input, target)?;
            }
            if epoch_error < min_error {
                return Ok(epoch);
            }
        }
        Ok(max_epochs)
    }
}
