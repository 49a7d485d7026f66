//! Epoch-driven training loop.
//!
//! [`Trainer`] borrows a network mutably for the duration of a run and walks
//! a [`TrainingSet`] in order, once per epoch, applying one backward pass per
//! sample. Early stopping is cooperative: either the cost drops below the
//! configured floor, or the per-sample progress callback asks to abort.

use log::{debug, info};

use crate::cost::Cost;
use crate::data::TrainingSet;
use crate::error::{Error, Result};
use crate::network::Network;
use crate::vector::Vector;

/// Per-sample progress callback, invoked before the sample is trained on:
/// `(network, input, target, epoch, sample_index, last_error)`. Returning
/// `true` halts the run immediately. `last_error` is the cost of the most
/// recently trained sample, `0.0` before the first one.
pub type ProgressFn<'a> = dyn FnMut(&Network, &Vector, &Vector, usize, usize, f64) -> bool + 'a;

/// Drives back-propagation over a training set.
///
/// `min_error` gates early stopping: an epoch run returns as soon as a
/// sample's post-step cost falls below it. A negative value never matches a
/// non-negative cost, which disables early stopping.
#[derive(Debug)]
pub struct Trainer<'a> {
    network: &'a mut Network,
    max_epochs: usize,
    min_error: f64,
}

impl<'a> Trainer<'a> {
    pub fn new(network: &'a mut Network, max_epochs: usize, min_error: f64) -> Self {
        Self {
            network,
            max_epochs,
            min_error,
        }
    }

    #[inline]
    pub fn network(&self) -> &Network {
        self.network
    }

    #[inline]
    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    #[inline]
    pub fn min_error(&self) -> f64 {
        self.min_error
    }

    /// One training step on a single sample: forward pass, error seeding per
    /// `cost`'s policy, weight update sweep. Returns whether the sample's
    /// cost after the step is below `min_error`.
    ///
    /// All validation happens before the network is touched, so a failed
    /// call leaves it exactly as it was.
    pub fn train(&mut self, input: &Vector, target: &Vector, cost: &Cost) -> Result<bool> {
        cost.validate()?;
        if target.len() != self.network.output_size() {
            return Err(Error::SizeMismatch(format!(
                "target len {} does not match network output width {}",
                target.len(),
                self.network.output_size()
            )));
        }
        let err = self.step(input, target, cost)?;
        Ok(err < self.min_error)
    }

    /// Trains on the whole set for up to `max_epochs` epochs.
    ///
    /// Returns the epoch reached: the current epoch on convergence, or
    /// `max_epochs` when the run went the distance.
    pub fn run_training(&mut self, set: &TrainingSet, cost: &Cost) -> Result<usize> {
        self.run_training_with(set, cost, None, 1.0)
    }

    /// Full-control variant of [`Trainer::run_training`].
    ///
    /// `progress` is invoked before every sample and may abort the run.
    /// `fraction` limits each epoch to the first `fraction * set.len()`
    /// samples; `1.0` uses the whole set.
    pub fn run_training_with(
        &mut self,
        set: &TrainingSet,
        cost: &Cost,
        mut progress: Option<&mut ProgressFn<'_>>,
        fraction: f64,
    ) -> Result<usize> {
        cost.validate()?;
        if set.input_dim() != self.network.input_size() {
            return Err(Error::SizeMismatch(format!(
                "set input width {} does not match network input width {}",
                set.input_dim(),
                self.network.input_size()
            )));
        }
        if set.target_dim() != self.network.output_size() {
            return Err(Error::SizeMismatch(format!(
                "set target width {} does not match network output width {}",
                set.target_dim(),
                self.network.output_size()
            )));
        }

        let count = sample_count(set.len(), fraction);
        let mut last_err = 0.0;
        for epoch in 0..self.max_epochs {
            for (index, (input, target)) in set.samples()[..count].iter().enumerate() {
                if let Some(cb) = progress.as_mut() {
                    if cb(self.network, input, target, epoch, index, last_err) {
                        info!("run aborted by callback at epoch {epoch}, sample {index}");
                        return Ok(epoch);
                    }
                }
                last_err = self.step(input, target, cost)?;
                if last_err < self.min_error {
                    info!("converged at epoch {epoch}: error {last_err:.6}");
                    return Ok(epoch);
                }
            }
            debug!("epoch {epoch} done, last error {last_err:.6}");
        }
        Ok(self.max_epochs)
    }

    fn step(&mut self, input: &Vector, target: &Vector, cost: &Cost) -> Result<f64> {
        self.network.set_input(input)?;
        self.network.feed_forward();
        self.network.back_propagate_with(target, cost)?;
        cost.evaluate(self.network, target)
    }
}

fn sample_count(len: usize, fraction: f64) -> usize {
    ((len as f64 * fraction) as usize).min(len)
}
