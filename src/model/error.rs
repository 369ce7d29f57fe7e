use thiserror::Error;

/// Failure modes of a simulation run.
///
/// `InvalidArgument` is fatal and raised before the run starts.
/// `NumericFailure` is raised per match by a rating update and recovered by
/// the driver (the pre-match ratings are kept). `Internal` signals a broken
/// invariant and is always fatal.
#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("numeric failure in rating update: {0}")]
    NumericFailure(String),
    #[error("internal invariant violated: {0}")]
    Internal(String)
}
