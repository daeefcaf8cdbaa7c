//! Generic power iteration over a caller-supplied step function.

use nimbus_core::error::MathError;

use crate::vector::ColumnVector;

/// The result of a power iteration run.
#[derive(Clone, Debug)]
pub struct IterationOutcome {
    /// The final (normalized) vector.
    pub vector: ColumnVector,
    /// Whether the L1 distance between successive iterates dropped below
    /// epsilon within the iteration budget.
    pub converged: bool,
    /// The number of steps taken.
    pub iterations: u32,
}

/// Repeatedly applies a linear step to a vector until the iterates stop
/// moving.
///
/// The step function owns the actual operator (typically a sparse
/// matrix-vector product plus teleportation terms); this type only owns
/// the convergence loop.
#[derive(Clone, Copy, Debug)]
pub struct PowerIteration {
    max_iterations: u32,
    epsilon: f64,
}

impl PowerIteration {
    pub fn new(max_iterations: u32, epsilon: f64) -> Self {
        Self { max_iterations, epsilon }
    }

    /// Run the iteration from `start`.
    ///
    /// Each step's output is normalized to unit absolute sum before the
    /// convergence check, so the epsilon threshold is scale-free.
    pub fn run(
        &self,
        start: ColumnVector,
        mut step: impl FnMut(&ColumnVector) -> Result<ColumnVector, MathError>,
    ) -> Result<IterationOutcome, MathError> {
        let mut current = start;
        current.normalize();

        let mut iterations = 0;
        while iterations < self.max_iterations {
            let mut next = step(&current)?;
            next.normalize();
            iterations += 1;

            let distance = next.l1_distance(&current)?;
            current = next;
            if distance <= self.epsilon {
                return Ok(IterationOutcome { vector: current, converged: true, iterations });
            }
        }

        Ok(IterationOutcome { vector: current, converged: false, iterations })
    }
}
