//! Cost policies: how training error is measured and how the output layer's
//! error signals are seeded.

use crate::error::{Error, Result};
use crate::network::Network;
use crate::vector::Vector;

/// User-supplied cost function: `(network, target) -> cost`.
///
/// The network's outputs are those of the most recent forward pass.
pub type UserCostFn = fn(&Network, &Vector) -> Result<f64>;

/// Cost policy used by the trainer.
///
/// Each policy pairs a scalar cost with an error-seeding rule for
/// back-propagation: the squared-error flavor folds the sigmoid derivative
/// into the seed, the cross-entropy flavor seeds with the raw residual.
#[derive(Debug, Clone, Copy)]
pub enum Cost {
    /// `0.5 * ||output - target||²`, seeded with `(1-o) ⊙ o ⊙ (t-o)`.
    MeanSquared,
    /// Mean negative log-likelihood, seeded with `t - o`.
    CrossEntropy,
    /// Caller-provided cost; seeds like [`Cost::MeanSquared`].
    User(Option<UserCostFn>),
}

impl Cost {
    /// Fails with [`Error::UserCostFunctionMissing`] if the user policy was
    /// selected without a function. Checked before training mutates anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            Cost::User(None) => Err(Error::UserCostFunctionMissing),
            _ => Ok(()),
        }
    }

    /// Cost of the network's current outputs against `target`.
    pub fn evaluate(&self, network: &Network, target: &Vector) -> Result<f64> {
        match self {
            Cost::MeanSquared => mean_squared_error(&network.copy_output(), target),
            Cost::CrossEntropy => cross_entropy(&network.copy_output(), target),
            Cost::User(Some(f)) => f(network, target),
            Cost::User(None) => Err(Error::UserCostFunctionMissing),
        }
    }

    /// Output-layer error seed for one backward pass.
    pub fn output_errors(&self, output: &Vector, target: &Vector) -> Result<Vector> {
        if output.len() != target.len() {
            return Err(Error::SizeMismatch(format!(
                "output len {} does not match target len {}",
                output.len(),
                target.len()
            )));
        }
        let errors = match self {
            Cost::CrossEntropy => output
                .iter()
                .zip(target.iter())
                .map(|(&o, &t)| t - o)
                .collect(),
            Cost::MeanSquared | Cost::User(_) => output
                .iter()
                .zip(target.iter())
                .map(|(&o, &t)| (1.0 - o) * o * (t - o))
                .collect(),
        };
        Ok(errors)
    }
}

/// `0.5 * ||output - target||²` (summed over outputs, not averaged).
pub fn mean_squared_error(output: &Vector, target: &Vector) -> Result<f64> {
    if output.len() != target.len() {
        return Err(Error::SizeMismatch(format!(
            "output len {} does not match target len {}",
            output.len(),
            target.len()
        )));
    }
    let sum: f64 = output
        .iter()
        .zip(target.iter())
        .map(|(&o, &t)| (o - t) * (o - t))
        .sum();
    Ok(0.5 * sum)
}

/// `-mean(t ⊙ ln o' + (1-t) ⊙ ln(1-o)')` where an exact-zero operand to
/// `ln` is first replaced by the smallest positive `f64`, so saturated
/// outputs never produce NaN or infinities.
pub fn cross_entropy(output: &Vector, target: &Vector) -> Result<f64> {
    if output.len() != target.len() {
        return Err(Error::SizeMismatch(format!(
            "output len {} does not match target len {}",
            output.len(),
            target.len()
        )));
    }
    if output.is_empty() {
        return Ok(0.0);
    }

    let mut acc = 0.0;
    for (&o, &t) in output.iter().zip(target.iter()) {
        acc += t * guard_zero(o).ln() + (1.0 - t) * guard_zero(1.0 - o).ln();
    }
    Ok(-(acc / output.len() as f64))
}

#[inline]
fn guard_zero(x: f64) -> f64 {
    if x == 0.0 {
        f64::MIN_POSITIVE
    } else {
        x
    }
}
