mod convergence_trace;
mod step_record;

pub use convergence_trace::{ConvergenceTrace, TraceFormat};
pub use step_record::StepRecord;
