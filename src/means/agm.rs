use crate::core::{IterativeMean, MeanError, StepRule, validate_non_negative};
use crate::utils::math::{arithmetic_mean, geometric_mean};

/// Arithmetic-geometric mean of a non-negative dataset.
///
/// Negative values are rejected at construction; use
/// [`ExtendedAgm`](crate::means::ExtendedAgm) for signed data.
pub type Agm = IterativeMean<AgmRule>;

/// Working state: `[geometric, arithmetic]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgmRule;

impl StepRule for AgmRule {
    type State = [f64; 2];
    const NAME: &'static str = "agm";

    fn validate(data: &[f64]) -> Result<(), MeanError> {
        validate_non_negative(data)
    }

    fn reset(raw: &[f64]) -> [f64; 2] {
        [geometric_mean(raw), arithmetic_mean(raw)]
    }

    fn step(state: &mut [f64; 2], _raw: &[f64], _iteration: u32) -> f64 {
        let arithmetic = arithmetic_mean(state);
        state[0] = geometric_mean(state);
        state[1] = arithmetic;
        arithmetic
    }
}
