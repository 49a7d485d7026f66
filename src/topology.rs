//! Layer-size description of a network.

use crate::error::{Error, Result};

/// Neuron counts per layer, input first and output last, e.g. `[2, 3, 1]`.
///
/// A usable topology has at least three layers (input, one hidden, output)
/// and no empty layer; [`Topology::new`] enforces both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    sizes: Vec<usize>,
}

impl Topology {
    /// Validates and wraps a list of layer sizes.
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        if sizes.len() < 3 {
            return Err(Error::SizeMismatch(format!(
                "topology needs at least 3 layers (input, hidden, output), got {}",
                sizes.len()
            )));
        }
        if let Some(layer) = sizes.iter().position(|&n| n == 0) {
            return Err(Error::SizeMismatch(format!(
                "topology layer {layer} has zero neurons"
            )));
        }
        Ok(Self { sizes })
    }

    /// Number of layers, counting the input layer.
    #[inline]
    pub fn layers(&self) -> usize {
        self.sizes.len()
    }

    /// Neuron count of layer `layer` (0 is the input layer).
    #[inline]
    pub fn size(&self, layer: usize) -> usize {
        self.sizes[layer]
    }

    /// Width of the input layer.
    #[inline]
    pub fn inputs(&self) -> usize {
        self.sizes[0]
    }

    /// Width of the output layer.
    #[inline]
    pub fn outputs(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Sizes of the hidden layers only.
    #[inline]
    pub fn hidden(&self) -> &[usize] {
        &self.sizes[1..self.sizes.len() - 1]
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.sizes
    }

    /// Total number of connection weights a network of this shape holds.
    ///
    /// Every neuron in layer `l` keeps one weight per neuron of layer
    /// `l - 1`; the initial weight scale is derived from this count.
    pub fn weight_count(&self) -> usize {
        self.sizes
            .windows(2)
            .map(|pair| pair[0] * pair[1])
            .sum()
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = Error;

    fn try_from(sizes: Vec<usize>) -> Result<Self> {
        Self::new(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_input_hidden_output() {
        let t = Topology::new(vec![2, 3, 1]).unwrap();
        assert_eq!(t.layers(), 3);
        assert_eq!(t.inputs(), 2);
        assert_eq!(t.outputs(), 1);
        assert_eq!(t.hidden(), &[3]);
        assert_eq!(t.as_slice(), &[2, 3, 1]);
    }

    #[test]
    fn rejects_fewer_than_three_layers() {
        assert!(matches!(
            Topology::new(vec![2, 1]),
            Err(Error::SizeMismatch(_))
        ));
        assert!(matches!(Topology::new(vec![]), Err(Error::SizeMismatch(_))));
    }

    #[test]
    fn rejects_empty_layers() {
        assert!(matches!(
            Topology::new(vec![2, 0, 1]),
            Err(Error::SizeMismatch(_))
        ));
    }

    #[test]
    fn weight_count_sums_adjacent_products() {
        let t = Topology::new(vec![2, 3, 1]).unwrap();
        assert_eq!(t.weight_count(), 2 * 3 + 3 * 1);

        let t = Topology::new(vec![4, 5, 5, 2]).unwrap();
        assert_eq!(t.weight_count(), 4 * 5 + 5 * 5 + 5 * 2);
    }
}
