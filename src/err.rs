/// Errors produced while building or running a [`crate::solver::Solver`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// A cell's domain emptied during collapse or propagation. Caught and
  /// retried by the solver's observation loop; only escapes as the cause
  /// wrapped inside [`Error::RetryCountExceeded`].
  #[error("contradiction at ({x}, {z}, {y})")]
  Contradiction { x: usize, z: usize, y: usize },

  /// More contradiction-driven restarts occurred than `retry_count` allows.
  #[error("exceeded retry count of {0}")]
  RetryCountExceeded(u64),

  /// Construction-time misconfiguration: bad dimensions, an empty catalog,
  /// a non-positive weight, or a boundary hook that changed the grid shape.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// The host requested cancellation between observation steps.
  #[error("solve was cancelled")]
  Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
