//! The matrix abstraction shared by the dense and sparse representations.

use nimbus_core::error::MathError;

use crate::vector::ColumnVector;

/// A 2-D matrix of `f64` values.
///
/// Implementations supply element access and traversal over their own
/// storage; the aggregate operations (column normalization, scaling,
/// pruning, matrix-vector multiplication) are written once here in terms
/// of that traversal, so sparse representations only pay for the entries
/// they actually hold.
pub trait Matrix {
    /// The number of rows.
    fn row_count(&self) -> usize;

    /// The number of columns.
    fn column_count(&self) -> usize;

    /// Read an element that is known to be in bounds.
    fn get_unchecked(&self, row: usize, col: usize) -> f64;

    /// Write an element that is known to be in bounds.
    fn set_unchecked(&mut self, row: usize, col: usize, value: f64);

    /// Visit every stored element as `(row, col, value)`.
    fn for_each(&self, visit: &mut dyn FnMut(usize, usize, f64));

    /// Visit every stored element and replace it with the returned value.
    ///
    /// Returning `0.0` from a sparse implementation removes the entry.
    fn update_each(&mut self, update: &mut dyn FnMut(usize, usize, f64) -> f64);

    /// Create an empty matrix of the same representation.
    fn create(row_count: usize, column_count: usize) -> Self
    where
        Self: Sized;

    // --- checked element access ---

    /// Read an element, reporting out-of-bounds coordinates.
    fn get(&self, row: usize, col: usize) -> Result<f64, MathError> {
        self.check_bounds(row, col)?;
        Ok(self.get_unchecked(row, col))
    }

    /// Write an element, reporting out-of-bounds coordinates.
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MathError> {
        self.check_bounds(row, col)?;
        self.set_unchecked(row, col, value);
        Ok(())
    }

    /// Add `value` to an element, reporting out-of-bounds coordinates.
    fn increment(&mut self, row: usize, col: usize, value: f64) -> Result<(), MathError> {
        let current = self.get(row, col)?;
        self.set_unchecked(row, col, current + value);
        Ok(())
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MathError> {
        if row >= self.row_count() || col >= self.column_count() {
            return Err(MathError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.column_count(),
            });
        }
        Ok(())
    }

    // --- aggregation ---

    /// The sum of all stored elements.
    fn sum(&self) -> f64 {
        let mut total = 0.0;
        self.for_each(&mut |_, _, value| total += value);
        total
    }

    /// The sum of the absolute values of all stored elements.
    fn abs_sum(&self) -> f64 {
        let mut total = 0.0;
        self.for_each(&mut |_, _, value| total += value.abs());
        total
    }

    /// Whether no stored element carries any mass.
    fn is_zero_matrix(&self) -> bool {
        self.abs_sum() == 0.0
    }

    /// The per-row sums as a vector.
    fn row_sum_vector(&self) -> Result<ColumnVector, MathError> {
        let mut sums = ColumnVector::new(self.row_count())?;
        self.for_each(&mut |row, _, value| sums.increment(row, value));
        Ok(sums)
    }

    /// The per-column sums as a vector.
    fn column_sum_vector(&self) -> Result<ColumnVector, MathError> {
        let mut sums = ColumnVector::new(self.column_count())?;
        self.for_each(&mut |_, col, value| sums.increment(col, value));
        Ok(sums)
    }

    // --- in-place mutation ---

    /// Divide every stored element by `divisor`.
    fn scale(&mut self, divisor: f64) {
        self.update_each(&mut |_, _, value| value / divisor);
    }

    /// Remove every stored negative element.
    fn remove_negatives(&mut self) {
        self.remove_less_than(0.0);
    }

    /// Remove every stored element below `minimum`.
    fn remove_less_than(&mut self, minimum: f64) {
        self.update_each(&mut |_, _, value| if value < minimum { 0.0 } else { value });
    }

    /// Scale each column so its absolute values sum to 1.
    ///
    /// Columns with no mass are left untouched and their indices are
    /// returned; in a transition matrix they are the dangling nodes whose
    /// mass the caller must redistribute.
    fn normalize_columns(&mut self) -> Result<Vec<usize>, MathError> {
        let mut sums = ColumnVector::new(self.column_count())?;
        self.for_each(&mut |_, col, value| sums.increment(col, value.abs()));

        let dangling = (0..self.column_count())
            .filter(|&col| sums.get(col) == 0.0)
            .collect();
        self.update_each(&mut |_, col, value| {
            let sum = sums.get(col);
            if sum == 0.0 {
                value
            } else {
                value / sum
            }
        });
        Ok(dangling)
    }

    // --- products ---

    /// Matrix-vector product `self * vector`.
    fn multiply(&self, vector: &ColumnVector) -> Result<ColumnVector, MathError> {
        if vector.size() != self.column_count() {
            return Err(MathError::DimensionMismatch {
                expected: self.column_count(),
                actual: vector.size(),
            });
        }
        let mut result = ColumnVector::new(self.row_count())?;
        self.for_each(&mut |row, col, value| result.increment(row, value * vector.get(col)));
        Ok(result)
    }

    /// Element-wise sum with a same-sized matrix of the same representation.
    fn add_element_wise(&self, other: &Self) -> Result<Self, MathError>
    where
        Self: Sized,
    {
        self.check_same_size(other)?;
        let mut result = Self::create(self.row_count(), self.column_count());
        self.for_each(&mut |row, col, value| result.set_unchecked(row, col, value));
        other.for_each(&mut |row, col, value| {
            let current = result.get_unchecked(row, col);
            result.set_unchecked(row, col, current + value);
        });
        Ok(result)
    }

    /// Element-wise product with a same-sized matrix of the same
    /// representation.
    fn multiply_element_wise(&self, other: &Self) -> Result<Self, MathError>
    where
        Self: Sized,
    {
        self.check_same_size(other)?;
        let mut result = Self::create(self.row_count(), self.column_count());
        self.for_each(&mut |row, col, value| {
            result.set_unchecked(row, col, value * other.get_unchecked(row, col));
        });
        Ok(result)
    }

    /// The transpose, in the same representation.
    fn transpose(&self) -> Self
    where
        Self: Sized,
    {
        let mut result = Self::create(self.column_count(), self.row_count());
        self.for_each(&mut |row, col, value| result.set_unchecked(col, row, value));
        result
    }

    fn check_same_size(&self, other: &Self) -> Result<(), MathError>
    where
        Self: Sized,
    {
        if self.row_count() != other.row_count() || self.column_count() != other.column_count() {
            return Err(MathError::SizeMismatch {
                lhs_rows: self.row_count(),
                lhs_cols: self.column_count(),
                rhs_rows: other.row_count(),
                rhs_cols: other.column_count(),
            });
        }
        Ok(())
    }
}

/// Whether two matrices of possibly different representations hold the
/// same values.
///
/// Both traversals are checked so that an entry stored by only one side
/// cannot hide behind the other's implicit zeros.
pub fn matrices_equal(lhs: &dyn Matrix, rhs: &dyn Matrix) -> bool {
    if lhs.row_count() != rhs.row_count() || lhs.column_count() != rhs.column_count() {
        return false;
    }
    let mut equal = true;
    lhs.for_each(&mut |row, col, value| {
        if value != rhs.get_unchecked(row, col) {
            equal = false;
        }
    });
    rhs.for_each(&mut |row, col, value| {
        if value != lhs.get_unchecked(row, col) {
            equal = false;
        }
    });
    equal
}
