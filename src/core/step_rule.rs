use crate::core::error::{MeanError, validate_dataset};
use std::fmt::Debug;

/// Per-step update rule driven by [`IterativeMean`](crate::core::IterativeMean).
///
/// A rule never stores data itself: the engine owns the dataset and the
/// rule-shaped working state, and calls [`reset`](StepRule::reset) before the
/// first [`step`](StepRule::step) of every computation.
pub trait StepRule {
    /// Working values carried between steps.
    type State: Debug + Clone;

    /// Short name used in logs and reports.
    const NAME: &'static str;

    /// Checks the dataset at construction time.
    fn validate(data: &[f64]) -> Result<(), MeanError> {
        validate_dataset(data)
    }

    /// Derives the initial working state from the dataset.
    fn reset(raw: &[f64]) -> Self::State;

    /// Advances the working state by one step and returns the next estimate.
    ///
    /// `iteration` is the 1-based counter of the step being performed.
    fn step(state: &mut Self::State, raw: &[f64], iteration: u32) -> f64;
}
