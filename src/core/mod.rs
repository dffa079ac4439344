mod error;
mod iterative_mean;
mod mean;
mod step_rule;
pub mod trace;

pub use error::MeanError;
pub(crate) use error::{validate_dataset, validate_non_negative, validate_precision};
pub use iterative_mean::IterativeMean;
pub use mean::{DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION, Mean};
pub use step_rule::StepRule;
pub use trace::{ConvergenceTrace, StepRecord, TraceFormat};
