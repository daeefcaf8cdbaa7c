//! A linear algebra column vector.

use nimbus_core::error::MathError;

/// A fixed-size 1-D container of `f64` values.
///
/// Creation with size zero is rejected. Indexing follows slice semantics
/// and panics out of range; dimension mismatches between two vectors are
/// reported as [`MathError::DimensionMismatch`].
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnVector {
    elements: Vec<f64>,
}

impl ColumnVector {
    /// Create a zero vector of the given size.
    pub fn new(size: usize) -> Result<Self, MathError> {
        if size == 0 {
            return Err(MathError::ZeroSizeVector);
        }
        Ok(Self { elements: vec![0.0; size] })
    }

    /// Create a vector from existing values.
    pub fn from_vec(elements: Vec<f64>) -> Result<Self, MathError> {
        if elements.is_empty() {
            return Err(MathError::ZeroSizeVector);
        }
        Ok(Self { elements })
    }

    /// The number of elements.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// The value at `index`. Panics if out of range.
    pub fn get(&self, index: usize) -> f64 {
        self.elements[index]
    }

    /// Set the value at `index`. Panics if out of range.
    pub fn set(&mut self, index: usize, value: f64) {
        self.elements[index] = value;
    }

    /// Add `value` to the element at `index`. Panics if out of range.
    pub fn increment(&mut self, index: usize, value: f64) {
        self.elements[index] += value;
    }

    /// Set every element to `value`.
    pub fn set_all(&mut self, value: f64) {
        self.elements.fill(value);
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    // --- aggregation ---

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.elements.iter().sum()
    }

    /// Sum of the absolute values of all elements.
    pub fn abs_sum(&self) -> f64 {
        self.elements.iter().map(|v| v.abs()).sum()
    }

    /// The maximum element.
    pub fn max(&self) -> f64 {
        self.elements.iter().fold(self.elements[0], |acc, &v| acc.max(v))
    }

    /// The median element (mean of the two middle elements for even sizes).
    pub fn median(&self) -> f64 {
        let mut sorted = self.elements.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    /// Whether every element is exactly zero.
    pub fn is_zero_vector(&self) -> bool {
        self.abs_sum() == 0.0
    }

    // --- in-place mutation ---

    /// Normalize so that the absolute values of all elements sum to 1.
    ///
    /// An all-zero vector is left unchanged: there is no mass to
    /// redistribute, and consensus code must not manufacture NaNs.
    pub fn normalize(&mut self) {
        let sum = self.abs_sum();
        if sum == 0.0 {
            return;
        }
        self.scale(sum);
    }

    /// Divide every element by `divisor`.
    pub fn scale(&mut self, divisor: f64) {
        for value in &mut self.elements {
            *value /= divisor;
        }
    }

    /// Scale so that element 0 becomes 1; helps the power iteration
    /// converge faster. Fails (returns `false`) if element 0 is zero.
    pub fn align(&mut self) -> bool {
        let first = self.elements[0];
        if first == 0.0 {
            return false;
        }
        self.scale(first);
        true
    }

    /// Clamp all negative elements to zero.
    pub fn remove_negatives(&mut self) {
        for value in &mut self.elements {
            if *value < 0.0 {
                *value = 0.0;
            }
        }
    }

    // --- value-producing transforms ---

    /// A new vector with `scalar` added to every element.
    pub fn add(&self, scalar: f64) -> Self {
        self.transform(|v| v + scalar)
    }

    /// A new vector with every element multiplied by `scalar`.
    pub fn multiply(&self, scalar: f64) -> Self {
        self.transform(|v| v * scalar)
    }

    /// A new vector of element-wise square roots.
    pub fn sqrt(&self) -> Self {
        self.transform(f64::sqrt)
    }

    /// A new vector of element-wise absolute values.
    pub fn abs(&self) -> Self {
        self.transform(f64::abs)
    }

    /// A new vector with every element rounded to `places` decimal places.
    pub fn round_to(&self, places: u32) -> Self {
        let multiplier = 10f64.powi(places as i32);
        self.transform(|v| (v * multiplier).round() / multiplier)
    }

    fn transform(&self, op: impl Fn(f64) -> f64) -> Self {
        Self { elements: self.elements.iter().map(|&v| op(v)).collect() }
    }

    // --- element-wise joins ---

    /// Element-wise sum of two equally-sized vectors.
    pub fn add_element_wise(&self, other: &Self) -> Result<Self, MathError> {
        self.join(other, |l, r| l + r)
    }

    /// Element-wise product of two equally-sized vectors.
    pub fn multiply_element_wise(&self, other: &Self) -> Result<Self, MathError> {
        self.join(other, |l, r| l * r)
    }

    fn join(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Result<Self, MathError> {
        self.check_same_size(other)?;
        let elements = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(&l, &r)| op(l, r))
            .collect();
        Ok(Self { elements })
    }

    // --- distance / correlation ---

    /// Manhattan distance (L1 norm of the difference).
    pub fn l1_distance(&self, other: &Self) -> Result<f64, MathError> {
        self.distance(other, f64::abs)
    }

    /// Euclidean distance (L2 norm of the difference).
    pub fn l2_distance(&self, other: &Self) -> Result<f64, MathError> {
        Ok(self.distance(other, |d| d * d)?.sqrt())
    }

    /// Euclidean length of this vector.
    pub fn magnitude(&self) -> f64 {
        self.elements.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn distance(&self, other: &Self, aggregate: impl Fn(f64) -> f64) -> Result<f64, MathError> {
        self.check_same_size(other)?;
        Ok(self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(&l, &r)| aggregate(l - r))
            .sum())
    }

    /// Pearson correlation coefficient between two equally-sized vectors.
    pub fn correlation(&self, other: &Self) -> Result<f64, MathError> {
        self.check_same_size(other)?;
        let adjusted_x = self.mean_adjust();
        let adjusted_y = other.mean_adjust();

        let squared_deviation_x = adjusted_x.multiply_element_wise(&adjusted_x)?.sum();
        let squared_deviation_y = adjusted_y.multiply_element_wise(&adjusted_y)?.sum();
        let deviation_product = adjusted_x.multiply_element_wise(&adjusted_y)?.sum();
        Ok(deviation_product / (squared_deviation_x * squared_deviation_y).sqrt())
    }

    fn mean_adjust(&self) -> Self {
        let mean = self.sum() / self.size() as f64;
        self.add(-mean)
    }

    fn check_same_size(&self, other: &Self) -> Result<(), MathError> {
        if self.size() != other.size() {
            return Err(MathError::DimensionMismatch {
                expected: self.size(),
                actual: other.size(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vector(values: &[f64]) -> ColumnVector {
        ColumnVector::from_vec(values.to_vec()).unwrap()
    }

    // --- construction ---

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(ColumnVector::new(0), Err(MathError::ZeroSizeVector));
        assert_eq!(ColumnVector::from_vec(vec![]), Err(MathError::ZeroSizeVector));
    }

    #[test]
    fn new_vector_is_all_zero() {
        let v = ColumnVector::new(4).unwrap();
        assert_eq!(v.size(), 4);
        assert!(v.is_zero_vector());
    }

    // --- aggregation ---

    #[test]
    fn sum_and_abs_sum() {
        let v = vector(&[3.0, -2.0, 5.0]);
        assert_eq!(v.sum(), 6.0);
        assert_eq!(v.abs_sum(), 10.0);
    }

    #[test]
    fn max_handles_negatives() {
        assert_eq!(vector(&[-7.0, -3.0, -11.0]).max(), -3.0);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(vector(&[5.0, 1.0, 3.0]).median(), 3.0);
        assert_eq!(vector(&[4.0, 1.0, 3.0, 2.0]).median(), 2.5);
    }

    // --- normalize / scale / align ---

    #[test]
    fn normalize_produces_unit_abs_sum() {
        let mut v = vector(&[3.0, -5.0, 2.0]);
        v.normalize();
        assert!((v.abs_sum() - 1.0).abs() < 1e-12);
        assert_eq!(v.get(0), 0.3);
        assert_eq!(v.get(1), -0.5);
        assert_eq!(v.get(2), 0.2);
    }

    #[test]
    fn normalize_of_zero_vector_is_a_no_op() {
        let mut v = ColumnVector::new(3).unwrap();
        v.normalize();
        assert!(v.is_zero_vector());
        assert!(v.as_slice().iter().all(|value| !value.is_nan()));
    }

    #[test]
    fn scale_divides() {
        let mut v = vector(&[2.0, 4.0]);
        v.scale(4.0);
        assert_eq!(v.as_slice(), &[0.5, 1.0]);
    }

    #[test]
    fn align_scales_first_element_to_one() {
        let mut v = vector(&[4.0, 8.0, 2.0]);
        assert!(v.align());
        assert_eq!(v.as_slice(), &[1.0, 2.0, 0.5]);
    }

    #[test]
    fn align_fails_when_first_element_is_zero() {
        let mut v = vector(&[0.0, 8.0]);
        assert!(!v.align());
        assert_eq!(v.as_slice(), &[0.0, 8.0]);
    }

    #[test]
    fn remove_negatives_clamps_to_zero() {
        let mut v = vector(&[1.0, -2.0, 0.0, -0.5]);
        v.remove_negatives();
        assert_eq!(v.as_slice(), &[1.0, 0.0, 0.0, 0.0]);
    }

    // --- transforms ---

    #[test]
    fn scalar_transforms() {
        let v = vector(&[1.0, 4.0]);
        assert_eq!(v.add(2.0).as_slice(), &[3.0, 6.0]);
        assert_eq!(v.multiply(3.0).as_slice(), &[3.0, 12.0]);
        assert_eq!(v.sqrt().as_slice(), &[1.0, 2.0]);
        assert_eq!(vector(&[-1.5, 2.0]).abs().as_slice(), &[1.5, 2.0]);
    }

    #[test]
    fn round_to_places() {
        let v = vector(&[1.23456, 2.34567]);
        assert_eq!(v.round_to(2).as_slice(), &[1.23, 2.35]);
    }

    // --- element-wise joins ---

    #[test]
    fn element_wise_operations() {
        let a = vector(&[1.0, 2.0, 3.0]);
        let b = vector(&[4.0, 5.0, 6.0]);
        assert_eq!(a.add_element_wise(&b).unwrap().as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!(a.multiply_element_wise(&b).unwrap().as_slice(), &[4.0, 10.0, 18.0]);
    }

    #[test]
    fn element_wise_rejects_size_mismatch() {
        let a = vector(&[1.0, 2.0]);
        let b = vector(&[1.0, 2.0, 3.0]);
        assert_eq!(
            a.add_element_wise(&b),
            Err(MathError::DimensionMismatch { expected: 2, actual: 3 })
        );
        assert!(a.multiply_element_wise(&b).is_err());
        assert!(a.l1_distance(&b).is_err());
        assert!(a.correlation(&b).is_err());
    }

    // --- distance / correlation ---

    #[test]
    fn l1_distance_is_sum_of_absolute_differences() {
        let a = vector(&[1.0, 5.0]);
        let b = vector(&[3.0, 2.0]);
        assert_eq!(a.l1_distance(&b).unwrap(), 5.0);
    }

    #[test]
    fn l2_distance_is_euclidean() {
        let a = vector(&[0.0, 0.0]);
        let b = vector(&[3.0, 4.0]);
        assert_eq!(a.l2_distance(&b).unwrap(), 5.0);
        assert_eq!(b.magnitude(), 5.0);
    }

    #[test]
    fn correlation_of_identical_vectors_is_one() {
        let a = vector(&[1.0, 2.0, 3.0, 4.0]);
        assert!((a.correlation(&a).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_of_opposed_vectors_is_minus_one() {
        let a = vector(&[1.0, 2.0, 3.0]);
        let b = vector(&[3.0, 2.0, 1.0]);
        assert!((a.correlation(&b).unwrap() + 1.0).abs() < 1e-12);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn normalize_invariant(values in prop::collection::vec(-1e6f64..1e6, 1..64)) {
            let mut v = ColumnVector::from_vec(values).unwrap();
            let before = v.abs_sum();
            v.normalize();
            if before == 0.0 {
                prop_assert!(v.is_zero_vector());
            } else {
                prop_assert!((v.abs_sum() - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn remove_negatives_leaves_no_negative(values in prop::collection::vec(-1e6f64..1e6, 1..64)) {
            let mut v = ColumnVector::from_vec(values).unwrap();
            v.remove_negatives();
            prop_assert!(v.as_slice().iter().all(|&value| value >= 0.0));
        }

        #[test]
        fn l1_distance_symmetric(
            values in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..32),
        ) {
            let (left, right): (Vec<f64>, Vec<f64>) = values.into_iter().unzip();
            let a = ColumnVector::from_vec(left).unwrap();
            let b = ColumnVector::from_vec(right).unwrap();
            let ab = a.l1_distance(&b).unwrap();
            let ba = b.l1_distance(&a).unwrap();
            prop_assert_eq!(ab, ba);
        }
    }
}
