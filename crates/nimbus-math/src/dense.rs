//! Row-major dense matrix storage.

use crate::matrix::Matrix;

/// A dense matrix backed by a single row-major buffer.
///
/// Traversal visits every cell, zeros included, so this representation is
/// only appropriate for small matrices such as the inter-level proximity
/// blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix {
    row_count: usize,
    column_count: usize,
    values: Vec<f64>,
}

impl DenseMatrix {
    /// Create a zero matrix with the given dimensions.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
            values: vec![0.0; row_count * column_count],
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.column_count + col
    }
}

impl Matrix for DenseMatrix {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        self.values[self.index(row, col)]
    }

    fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        let index = self.index(row, col);
        self.values[index] = value;
    }

    fn for_each(&self, visit: &mut dyn FnMut(usize, usize, f64)) {
        for row in 0..self.row_count {
            for col in 0..self.column_count {
                visit(row, col, self.values[self.index(row, col)]);
            }
        }
    }

    fn update_each(&mut self, update: &mut dyn FnMut(usize, usize, f64) -> f64) {
        for row in 0..self.row_count {
            for col in 0..self.column_count {
                let index = self.index(row, col);
                self.values[index] = update(row, col, self.values[index]);
            }
        }
    }

    fn create(row_count: usize, column_count: usize) -> Self {
        Self::new(row_count, column_count)
    }
}
