//! Supervised training data.
//!
//! A [`TrainingSet`] owns `(input, target)` pairs with uniform widths,
//! validated once at construction so the training loop never re-checks
//! sample shapes.

use crate::error::{Error, Result};
use crate::vector::Vector;

/// Ordered collection of `(input, target)` samples.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    samples: Vec<(Vector, Vector)>,
    input_dim: usize,
    target_dim: usize,
}

impl TrainingSet {
    /// Creates an empty set accepting inputs of width `input_dim` and
    /// targets of width `target_dim`.
    pub fn new(input_dim: usize, target_dim: usize) -> Result<Self> {
        if input_dim == 0 || target_dim == 0 {
            return Err(Error::SizeMismatch(
                "sample widths must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            samples: Vec::new(),
            input_dim,
            target_dim,
        })
    }

    /// Builds a set from existing pairs, validating every sample's shape.
    pub fn from_pairs(
        pairs: Vec<(Vector, Vector)>,
        input_dim: usize,
        target_dim: usize,
    ) -> Result<Self> {
        let mut set = Self::new(input_dim, target_dim)?;
        for (i, (input, target)) in pairs.iter().enumerate() {
            set.check_sample(i, input, target)?;
        }
        set.samples = pairs;
        Ok(set)
    }

    /// Appends one sample.
    pub fn push(&mut self, input: Vector, target: Vector) -> Result<()> {
        self.check_sample(self.samples.len(), &input, &target)?;
        self.samples.push((input, target));
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    pub fn target_dim(&self) -> usize {
        self.target_dim
    }

    #[inline]
    pub fn samples(&self) -> &[(Vector, Vector)] {
        &self.samples
    }

    fn check_sample(&self, idx: usize, input: &Vector, target: &Vector) -> Result<()> {
        if input.len() != self.input_dim {
            return Err(Error::SizeMismatch(format!(
                "sample {idx}: input len {} does not match set input width {}",
                input.len(),
                self.input_dim
            )));
        }
        if target.len() != self.target_dim {
            return Err(Error::SizeMismatch(format!(
                "sample {idx}: target len {} does not match set target width {}",
                target.len(),
                self.target_dim
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(values: &[f64]) -> Vector {
        Vector::from_slice(values)
    }

    #[test]
    fn from_pairs_validates_every_sample() {
        let ok = TrainingSet::from_pairs(
            vec![
                (v(&[0.0, 0.0]), v(&[0.0])),
                (v(&[1.0, 0.0]), v(&[1.0])),
            ],
            2,
            1,
        );
        assert!(ok.is_ok());

        let err = TrainingSet::from_pairs(
            vec![
                (v(&[0.0, 0.0]), v(&[0.0])),
                (v(&[1.0]), v(&[1.0])),
            ],
            2,
            1,
        );
        assert!(matches!(err, Err(Error::SizeMismatch(_))));
    }

    #[test]
    fn push_rejects_misshapen_samples() {
        let mut set = TrainingSet::new(2, 1).unwrap();
        set.push(v(&[0.0, 1.0]), v(&[1.0])).unwrap();

        assert!(set.push(v(&[0.0]), v(&[1.0])).is_err());
        assert!(set.push(v(&[0.0, 1.0]), v(&[1.0, 0.0])).is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn zero_widths_are_rejected() {
        assert!(TrainingSet::new(0, 1).is_err());
        assert!(TrainingSet::new(2, 0).is_err());
    }
}
