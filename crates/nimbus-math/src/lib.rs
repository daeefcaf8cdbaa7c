//! # nimbus-math — linear algebra for the importance engine.
//!
//! Deliberately not a general-purpose linear algebra library: only the
//! operations the importance engine needs are implemented, and every
//! operation is deterministic given identical inputs and iteration order
//! (consensus nodes must produce bitwise-identical results).
//!
//! - [`ColumnVector`]: fixed-size 1-D `f64` container with in-place
//!   mutation and value-producing transforms.
//! - [`Matrix`]: the shared traversal/aggregate algorithms, implemented by
//!   [`DenseMatrix`] and [`SparseMatrix`].
//! - [`PowerIteration`]: generic fixed-point iteration with L1 convergence
//!   detection.

pub mod dense;
pub mod matrix;
pub mod power;
pub mod sparse;
pub mod vector;

pub use dense::DenseMatrix;
pub use matrix::{matrices_equal, Matrix};
pub use power::{IterationOutcome, PowerIteration};
pub use sparse::SparseMatrix;
pub use vector::ColumnVector;
