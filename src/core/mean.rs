use crate::core::error::MeanError;
use crate::core::trace::ConvergenceTrace;

/// Default convergence threshold.
pub const DEFAULT_PRECISION: f64 = 1e-6;

/// Default cap on precision-bounded iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000_000;

/// Public contract shared by every mean.
///
/// Object safe, so callers can hold a `Box<dyn Mean>` built from
/// configuration.
pub trait Mean {
    /// Short name of the strategy (e.g. `"agm"`).
    fn name(&self) -> &'static str;

    /// Sets the convergence threshold. Rejects values that are not `> 0`
    /// and keeps the previous threshold in that case.
    fn set_precision(&mut self, precision: f64) -> Result<(), MeanError>;

    fn precision(&self) -> f64;

    /// Caps the number of steps [`calculate`](Mean::calculate) may take.
    fn set_max_iterations(&mut self, limit: u32);

    fn max_iterations(&self) -> u32;

    /// Resets, then iterates until two successive estimates differ by at most
    /// the precision threshold.
    fn calculate(&mut self) -> Result<f64, MeanError>;

    /// Resets, then iterates exactly `depth` times regardless of convergence.
    /// With `depth == 0` no estimate exists and the result is NaN.
    fn calculate_to_depth(&mut self, depth: u32) -> f64;

    /// Enables or disables per-step recording. Disabling drops the trace.
    /// Means without a single step sequence ignore this.
    fn record_trace(&mut self, _enabled: bool) {}

    /// Steps recorded since the last reset, if recording is on.
    fn trace(&self) -> Option<&ConvergenceTrace> {
        None
    }

    /// Number of elements in the dataset.
    fn size(&self) -> usize;

    fn get(&self, index: usize) -> Option<f64>;

    fn try_get(&self, index: usize) -> Result<f64, MeanError> {
        self.get(index).ok_or(MeanError::IndexOutOfRange {
            index,
            len: self.size(),
        })
    }

    /// Steps completed since the last reset.
    fn iterations(&self) -> u32;

    /// Result of the most recent computation; NaN before any step.
    fn mean(&self) -> f64;
}
