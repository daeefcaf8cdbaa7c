//! Compressed sparse row matrix storage.

use crate::matrix::Matrix;

/// One row of the sparse matrix: parallel arrays of column indices and
/// values, kept sorted by column so lookups can binary search.
#[derive(Clone, Debug, Default, PartialEq)]
struct SparseRow {
    columns: Vec<usize>,
    values: Vec<f64>,
}

impl SparseRow {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    fn get(&self, col: usize) -> f64 {
        match self.columns.binary_search(&col) {
            Ok(position) => self.values[position],
            Err(_) => 0.0,
        }
    }

    fn set(&mut self, col: usize, value: f64) {
        match self.columns.binary_search(&col) {
            Ok(position) => {
                if value == 0.0 {
                    self.columns.remove(position);
                    self.values.remove(position);
                } else {
                    self.values[position] = value;
                }
            }
            Err(position) => {
                if value == 0.0 {
                    return;
                }
                self.reserve_for_one();
                self.columns.insert(position, col);
                self.values.insert(position, value);
            }
        }
    }

    // Grow by a factor of 1.6 to trade a little slack for fewer copies
    // while rows fill up during graph construction.
    fn reserve_for_one(&mut self) {
        if self.columns.len() < self.columns.capacity() {
            return;
        }
        let capacity = ((self.columns.capacity() as f64 * 1.6) as usize).max(1);
        let additional = capacity - self.columns.len();
        self.columns.reserve_exact(additional);
        self.values.reserve_exact(additional);
    }
}

/// A sparse matrix that only stores non-zero entries.
///
/// Setting an existing entry to zero removes it. Rows pre-allocate
/// `initial_capacity_per_row` slots and grow geometrically past that.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    row_count: usize,
    column_count: usize,
    rows: Vec<SparseRow>,
}

impl SparseMatrix {
    /// Create an empty matrix with a per-row capacity hint.
    pub fn new(row_count: usize, column_count: usize, initial_capacity_per_row: usize) -> Self {
        Self {
            row_count,
            column_count,
            rows: (0..row_count)
                .map(|_| SparseRow::with_capacity(initial_capacity_per_row))
                .collect(),
        }
    }

    /// The number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(|row| row.columns.len()).sum()
    }

    /// The number of stored entries in `row`.
    pub fn non_zero_count_in_row(&self, row: usize) -> usize {
        self.rows[row].columns.len()
    }

    /// The allocated slot count of `row`.
    pub fn row_capacity(&self, row: usize) -> usize {
        self.rows[row].columns.capacity()
    }

    /// The stored `(column, value)` entries of `row`, ordered by column.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let row = &self.rows[row];
        row.columns.iter().copied().zip(row.values.iter().copied())
    }
}

impl Matrix for SparseMatrix {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        self.rows[row].get(col)
    }

    fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        self.rows[row].set(col, value);
    }

    fn for_each(&self, visit: &mut dyn FnMut(usize, usize, f64)) {
        for (row_index, row) in self.rows.iter().enumerate() {
            for (position, &col) in row.columns.iter().enumerate() {
                visit(row_index, col, row.values[position]);
            }
        }
    }

    fn update_each(&mut self, update: &mut dyn FnMut(usize, usize, f64) -> f64) {
        for (row_index, row) in self.rows.iter_mut().enumerate() {
            let mut position = 0;
            while position < row.columns.len() {
                let col = row.columns[position];
                let updated = update(row_index, col, row.values[position]);
                if updated == 0.0 {
                    // Removal shifts the next entry into this position,
                    // so don't advance.
                    row.columns.remove(position);
                    row.values.remove(position);
                } else {
                    row.values[position] = updated;
                    position += 1;
                }
            }
        }
    }

    fn create(row_count: usize, column_count: usize) -> Self {
        Self::new(row_count, column_count, 0)
    }
}
