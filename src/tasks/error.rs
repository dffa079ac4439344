use crate::core::MeanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Mean(#[from] MeanError),

    #[error("{0} does not record a convergence trace")]
    TraceUnavailable(&'static str),

    #[error("writing trace: {0}")]
    Io(#[from] std::io::Error),
}
