use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// One completed convergence step.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub iteration: u32,
    pub estimate: f64,
    /// `|previous - estimate|`; NaN for the first step after a reset.
    pub difference: f64,
}

impl Display for StepRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "iter={}, estimate={:.12}, diff={:.3e}",
            self.iteration, self.estimate, self.difference
        )
    }
}
