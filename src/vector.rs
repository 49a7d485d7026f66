//! Dense `f64` vector primitive.
//!
//! `Vector` is the value type every other component trades in: network
//! inputs, targets, neuron weights, and momentum deltas. Vector-vector
//! arithmetic requires equal lengths and reports [`Error::SizeMismatch`]
//! otherwise; there is no silent truncation. Scalar arithmetic broadcasts
//! and always succeeds, so it is exposed through the standard `+=`-family
//! operators instead.

use std::ops;

use crate::error::{Error, Result};
use crate::text_model::TokenReader;

/// Growable sequence of `f64` values with elementwise arithmetic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector {
    values: Vec<f64>,
}

impl Vector {
    /// Creates an empty vector.
    #[inline]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates a vector of `len` copies of `value`.
    #[inline]
    pub fn filled(len: usize, value: f64) -> Self {
        Self {
            values: vec![value; len],
        }
    }

    /// Creates a vector by copying a slice.
    #[inline]
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Appends a value at the end.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Resizes in place; new slots are filled with `value`.
    #[inline]
    pub fn resize(&mut self, len: usize, value: f64) {
        self.values.resize(len, value);
    }

    /// Sum of all elements (0.0 when empty).
    #[inline]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean of all elements (0.0 when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.sum() / self.values.len() as f64
    }

    /// Squared Euclidean norm: `Σ vᵢ²`.
    #[inline]
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Index of the largest element; ties resolve to the first occurrence.
    ///
    /// Returns `None` on an empty vector.
    pub fn arg_max(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                None => best = Some((i, v)),
                Some((_, bv)) if v > bv => best = Some((i, v)),
                Some(_) => {}
            }
        }
        best.map(|(i, _)| i)
    }

    /// Applies `f` to every element in place.
    #[inline]
    pub fn apply<F: FnMut(f64) -> f64>(&mut self, mut f: F) {
        for v in &mut self.values {
            *v = f(*v);
        }
    }

    /// Replaces every element with its absolute value.
    #[inline]
    pub fn abs(&mut self) {
        self.apply(f64::abs);
    }

    /// Replaces every element with its natural logarithm.
    #[inline]
    pub fn ln(&mut self) {
        self.apply(f64::ln);
    }

    /// Negates every element.
    #[inline]
    pub fn negate(&mut self) {
        self.apply(|v| -v);
    }

    /// Elementwise `self += rhs`.
    ///
    /// Fails with [`Error::SizeMismatch`] unless the lengths are equal.
    pub fn add_assign(&mut self, rhs: &Vector) -> Result<()> {
        self.zip_assign(rhs, "add", |a, b| *a += b)
    }

    /// Elementwise `self -= rhs`.
    pub fn sub_assign(&mut self, rhs: &Vector) -> Result<()> {
        self.zip_assign(rhs, "sub", |a, b| *a -= b)
    }

    /// Elementwise `self *= rhs`.
    pub fn mul_assign(&mut self, rhs: &Vector) -> Result<()> {
        self.zip_assign(rhs, "mul", |a, b| *a *= b)
    }

    /// Elementwise `self /= rhs`.
    pub fn div_assign(&mut self, rhs: &Vector) -> Result<()> {
        self.zip_assign(rhs, "div", |a, b| *a /= b)
    }

    /// Dot product.
    ///
    /// Fails with [`Error::SizeMismatch`] unless the lengths are equal.
    pub fn dot(&self, rhs: &Vector) -> Result<f64> {
        self.check_len(rhs, "dot")?;
        Ok(self
            .values
            .iter()
            .zip(&rhs.values)
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Canonical text encoding: the length, a newline, then one value per
    /// line. `f64` values are printed with Rust's round-trip-safe `Display`,
    /// so [`Vector::from_text`] reproduces them bit for bit.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Decodes the exact inverse of [`Vector::to_text`].
    ///
    /// The token count must match the encoded length exactly; anything else
    /// fails with [`Error::InvalidFormat`].
    pub fn from_text(text: &str) -> Result<Self> {
        let mut reader = TokenReader::new(text);
        let vector = reader.read_vector()?;
        reader.finish()?;
        Ok(vector)
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        out.push_str(&self.values.len().to_string());
        out.push('\n');
        for v in &self.values {
            out.push_str(&v.to_string());
            out.push('\n');
        }
    }

    fn check_len(&self, rhs: &Vector, op: &str) -> Result<()> {
        if self.values.len() != rhs.values.len() {
            return Err(Error::SizeMismatch(format!(
                "{op}: lhs len {} does not match rhs len {}",
                self.values.len(),
                rhs.values.len()
            )));
        }
        Ok(())
    }

    fn zip_assign<F: Fn(&mut f64, f64)>(&mut self, rhs: &Vector, op: &str, f: F) -> Result<()> {
        self.check_len(rhs, op)?;
        for (a, &b) in self.values.iter_mut().zip(&rhs.values) {
            f(a, b);
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Vector {
    #[inline]
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl ops::Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl ops::IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

impl ops::AddAssign<f64> for Vector {
    fn add_assign(&mut self, rhs: f64) {
        self.apply(|v| v + rhs);
    }
}

impl ops::SubAssign<f64> for Vector {
    fn sub_assign(&mut self, rhs: f64) {
        self.apply(|v| v - rhs);
    }
}

impl ops::MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        self.apply(|v| v * rhs);
    }
}

impl ops::DivAssign<f64> for Vector {
    fn div_assign(&mut self, rhs: f64) {
        self.apply(|v| v / rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_sub_is_identity_within_tolerance() {
        let a = Vector::from(vec![0.5, -1.25, 3.0, 0.1]);
        let b = Vector::from(vec![2.0, 0.75, -0.5, 0.3]);

        let mut c = a.clone();
        c.add_assign(&b).unwrap();
        c.sub_assign(&b).unwrap();

        for (x, y) in c.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-12, "{x} != {y}");
        }
    }

    #[test]
    fn vector_arithmetic_rejects_unequal_lengths() {
        let mut a = Vector::from(vec![1.0, 2.0]);
        let b = Vector::from(vec![1.0, 2.0, 3.0]);

        assert!(matches!(
            a.add_assign(&b),
            Err(Error::SizeMismatch(_))
        ));
        assert!(matches!(a.dot(&b), Err(Error::SizeMismatch(_))));
        // The failed call must not have touched the receiver.
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn elementwise_ops_match_manual_results() {
        let mut a = Vector::from(vec![1.0, 2.0, 3.0]);
        let b = Vector::from(vec![4.0, 5.0, 6.0]);

        a.mul_assign(&b).unwrap();
        assert_eq!(a.as_slice(), &[4.0, 10.0, 18.0]);

        a.div_assign(&b).unwrap();
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);

        assert_eq!(a.dot(&b).unwrap(), 4.0 + 10.0 + 18.0);
    }

    #[test]
    fn scalar_broadcast_always_succeeds() {
        let mut v = Vector::from(vec![1.0, -2.0, 4.0]);
        v += 1.0;
        assert_eq!(v.as_slice(), &[2.0, -1.0, 5.0]);
        v *= 2.0;
        assert_eq!(v.as_slice(), &[4.0, -2.0, 10.0]);
        v -= 4.0;
        assert_eq!(v.as_slice(), &[0.0, -6.0, 6.0]);
        v /= 2.0;
        assert_eq!(v.as_slice(), &[0.0, -3.0, 3.0]);
    }

    #[test]
    fn reductions() {
        let v = Vector::from(vec![3.0, -4.0, 1.0]);
        assert_eq!(v.sum(), 0.0);
        assert_eq!(v.mean(), 0.0);
        assert_eq!(v.squared_norm(), 26.0);
        assert!((v.norm() - 26.0_f64.sqrt()).abs() < 1e-15);

        let empty = Vector::new();
        assert_eq!(empty.sum(), 0.0);
        assert_eq!(empty.mean(), 0.0);
    }

    #[test]
    fn arg_max_prefers_first_occurrence_and_fails_on_empty() {
        let v = Vector::from(vec![1.0, 5.0, 5.0, 2.0]);
        assert_eq!(v.arg_max(), Some(1));

        let single = Vector::from(vec![-7.0]);
        assert_eq!(single.arg_max(), Some(0));

        assert_eq!(Vector::new().arg_max(), None);
    }

    #[test]
    fn apply_and_conveniences() {
        let mut v = Vector::from(vec![-1.0, 4.0]);
        v.abs();
        assert_eq!(v.as_slice(), &[1.0, 4.0]);

        v.negate();
        assert_eq!(v.as_slice(), &[-1.0, -4.0]);

        v.apply(|x| x * x);
        assert_eq!(v.as_slice(), &[1.0, 16.0]);

        let mut w = Vector::from(vec![1.0, std::f64::consts::E]);
        w.ln();
        assert_eq!(w[0], 0.0);
        assert!((w[1] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn text_round_trip_is_bit_identical() {
        let v = Vector::from(vec![
            0.1,
            -1.0 / 3.0,
            f64::MIN_POSITIVE,
            1.0e300,
            -0.0,
            42.0,
        ]);
        let decoded = Vector::from_text(&v.to_text()).unwrap();
        assert_eq!(decoded.len(), v.len());
        for (a, b) in decoded.iter().zip(v.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn empty_vector_round_trips() {
        let v = Vector::new();
        assert_eq!(v.to_text(), "0\n");
        assert_eq!(Vector::from_text("0\n").unwrap(), v);
    }

    #[test]
    fn from_text_rejects_malformed_input() {
        assert!(matches!(
            Vector::from_text("two\n1.0 2.0"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            Vector::from_text("2\n1.0"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            Vector::from_text("1\nnot-a-number"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            Vector::from_text("1\n1.0 2.0"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn resize_and_push() {
        let mut v = Vector::new();
        v.push(1.0);
        v.resize(3, 0.5);
        assert_eq!(v.as_slice(), &[1.0, 0.5, 0.5]);
        v.resize(1, 0.0);
        assert_eq!(v.as_slice(), &[1.0]);
    }
}
