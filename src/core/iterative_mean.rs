use crate::core::error::{MeanError, validate_precision};
use crate::core::mean::{DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION, Mean};
use crate::core::step_rule::StepRule;
use crate::core::trace::{ConvergenceTrace, StepRecord};
use std::ops::Index;
use tracing::{debug, trace, warn};

/// Generic convergence engine.
///
/// Owns the dataset, the rule's working state, the iteration counter, the
/// precision threshold and the running mean. Each concrete mean is this
/// engine parameterized by a [`StepRule`].
#[derive(Debug, Clone)]
pub struct IterativeMean<R: StepRule> {
    raw: Vec<f64>,
    working: Option<R::State>,
    iteration: u32,
    precision: f64,
    max_iterations: u32,
    mean: f64,
    trace: Option<ConvergenceTrace>,
}

impl<R: StepRule> IterativeMean<R> {
    pub fn new(data: Vec<f64>) -> Result<Self, MeanError> {
        R::validate(&data)?;
        Ok(Self {
            raw: data,
            working: None,
            iteration: 0,
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            mean: f64::NAN,
            trace: None,
        })
    }

    /// Builder form of [`Mean::set_precision`].
    pub fn with_precision(mut self, precision: f64) -> Result<Self, MeanError> {
        self.precision = validate_precision(precision)?;
        Ok(self)
    }

    pub fn data(&self) -> &[f64] {
        &self.raw
    }

    /// Working state of the current computation; `None` before the first reset.
    pub fn working_state(&self) -> Option<&R::State> {
        self.working.as_ref()
    }

    /// Recomputes the working state from the dataset and zeroes the counter.
    pub fn reset(&mut self) {
        self.working = Some(R::reset(&self.raw));
        self.iteration = 0;
        self.mean = f64::NAN;
        if let Some(t) = self.trace.as_mut() {
            t.clear();
        }
        debug!(rule = R::NAME, size = self.raw.len(), "reset");
    }

    /// Performs one step and returns `|previous - next|`.
    ///
    /// Runs [`reset`](Self::reset) first if no computation is in progress.
    /// The first step after a reset has no previous estimate and returns NaN.
    pub fn iterate(&mut self) -> f64 {
        if self.working.is_none() {
            self.reset();
        }
        self.iteration += 1;
        let next = match self.working.as_mut() {
            Some(state) => R::step(state, &self.raw, self.iteration),
            None => f64::NAN,
        };
        let difference = (self.mean - next).abs();
        self.mean = next;

        trace!(rule = R::NAME, iteration = self.iteration, estimate = next, difference);
        if let Some(t) = self.trace.as_mut() {
            t.push(StepRecord {
                iteration: self.iteration,
                estimate: next,
                difference,
            });
        }
        difference
    }
}

#[inline]
fn within(difference: f64, precision: f64) -> bool {
    difference <= precision
}

impl<R: StepRule> Mean for IterativeMean<R> {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn set_precision(&mut self, precision: f64) -> Result<(), MeanError> {
        self.precision = validate_precision(precision)?;
        Ok(())
    }

    fn precision(&self) -> f64 {
        self.precision
    }

    fn set_max_iterations(&mut self, limit: u32) {
        self.max_iterations = limit;
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn calculate(&mut self) -> Result<f64, MeanError> {
        self.reset();
        let mut difference = f64::NAN;
        while !within(difference, self.precision) {
            if self.iteration >= self.max_iterations {
                warn!(
                    rule = R::NAME,
                    limit = self.max_iterations,
                    last_difference = difference,
                    "iteration limit reached"
                );
                return Err(MeanError::IterationLimit {
                    limit: self.max_iterations,
                    last_difference: difference,
                });
            }
            difference = self.iterate();
        }
        debug!(
            rule = R::NAME,
            iterations = self.iteration,
            mean = self.mean,
            "converged"
        );
        Ok(self.mean)
    }

    fn calculate_to_depth(&mut self, depth: u32) -> f64 {
        self.reset();
        while self.iteration < depth {
            self.iterate();
        }
        self.mean
    }

    fn record_trace(&mut self, enabled: bool) {
        self.trace = enabled.then(ConvergenceTrace::default);
    }

    fn trace(&self) -> Option<&ConvergenceTrace> {
        self.trace.as_ref()
    }

    fn size(&self) -> usize {
        self.raw.len()
    }

    fn get(&self, index: usize) -> Option<f64> {
        self.raw.get(index).copied()
    }

    fn iterations(&self) -> u32 {
        self.iteration
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

impl<R: StepRule> Index<usize> for IterativeMean<R> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.raw[index]
    }
}
