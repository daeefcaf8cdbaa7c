//! Error types for the Nimbus protocol.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("cannot create a vector of zero size")] ZeroSizeVector,
    #[error("index out of bounds: ({row}, {col}) in {rows}x{cols}")] IndexOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    #[error("dimension mismatch: expected {expected}, got {actual}")] DimensionMismatch { expected: usize, actual: usize },
    #[error("matrix sizes must be equal: {lhs_rows}x{lhs_cols} vs {rhs_rows}x{rhs_cols}")] SizeMismatch { lhs_rows: usize, lhs_cols: usize, rhs_rows: usize, rhs_cols: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoiError {
    #[error("there aren't any harvesting eligible accounts")] NoEligibleAccounts,
    #[error("power iteration failed to converge in {iterations} iterations")] NotConverged { iterations: u32 },
    #[error("{vector} vector is an unexpected dimension: expected {expected}, got {actual}")] UnexpectedDimension { vector: &'static str, expected: usize, actual: usize },
    #[error(transparent)] Math(#[from] MathError),
}
