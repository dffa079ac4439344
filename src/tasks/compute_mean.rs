use crate::core::{ConvergenceTrace, Mean, MeanError, TraceFormat};
use crate::tasks::TaskError;
use crate::ui::types::build::{BuildError, build_mean};
use crate::ui::types::choices::{MeanChoice, MeanKind};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvergedBy {
    Precision,
    Depth,
}

/// Outcome of one [`ComputeMean`] run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanReport {
    pub kind: String,
    pub size: usize,
    pub mean: f64,
    pub iterations: u32,
    pub converged_by: ConvergedBy,
}

impl Display for MeanReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let how = match self.converged_by {
            ConvergedBy::Precision => "converged",
            ConvergedBy::Depth => "stopped at depth",
        };
        write!(
            f,
            "{} of {} values = {:.12} ({} after {} iterations)",
            self.kind, self.size, self.mean, how, self.iterations
        )
    }
}

/// Runs a configured mean either to convergence or to a fixed depth.
pub struct ComputeMean {
    kind: MeanKind,
    mean: Box<dyn Mean>,
    depth: Option<u32>,
    trace_out: Option<(PathBuf, TraceFormat)>,
}

impl ComputeMean {
    pub fn new(choice: MeanChoice) -> Result<Self, BuildError> {
        let kind = choice.kind();
        let depth = choice.params().depth;
        let mean = build_mean(choice)?;
        Ok(Self {
            kind,
            mean,
            depth,
            trace_out: None,
        })
    }

    /// Records every step and writes the trace to `path` after each run.
    pub fn with_trace<P: Into<PathBuf>>(mut self, path: P, format: TraceFormat) -> Self {
        self.mean.record_trace(true);
        self.trace_out = Some((path.into(), format));
        self
    }

    pub fn run(&mut self) -> Result<MeanReport, TaskError> {
        let (value, converged_by) = match self.depth {
            Some(d) => (self.mean.calculate_to_depth(d), ConvergedBy::Depth),
            None => (self.mean.calculate()?, ConvergedBy::Precision),
        };

        if let Some((path, format)) = &self.trace_out {
            let trace = self
                .mean
                .trace()
                .ok_or(TaskError::TraceUnavailable(self.mean.name()))?;
            trace.export(path, *format)?;
        }

        let report = MeanReport {
            kind: self.kind.to_string(),
            size: self.mean.size(),
            mean: value,
            iterations: self.mean.iterations(),
            converged_by,
        };
        info!(kind = %report.kind, mean = report.mean, iterations = report.iterations, "mean computed");
        Ok(report)
    }

    pub fn trace(&self) -> Option<&ConvergenceTrace> {
        self.mean.trace()
    }
}
