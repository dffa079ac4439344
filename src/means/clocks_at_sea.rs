use crate::core::{IterativeMean, StepRule};
use crate::utils::math::{first_max_index, first_min_index};

/// Consensus mean modelled on ships' clocks: one accumulator ("clock") per
/// data point, and each step pulls the clock furthest from the group back
/// to the mean of the others.
///
/// Accumulators are running sums, so the corrected value is divided by the
/// step counter to get back to the scale of the data. Convergence is
/// empirical and slow compared with the AGM.
pub type ClocksAtSea = IterativeMean<ClocksAtSeaRule>;

/// Working state: one running sum per dataset element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClocksAtSeaRule;

/// What one outlier correction did to the clocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// The maximum was furthest from the naive mean and got the mean of the rest.
    Max {
        index: usize,
        replaced: f64,
        value: f64,
    },
    /// Mirror image of [`Correction::Max`].
    Min {
        index: usize,
        replaced: f64,
        value: f64,
    },
    /// Extremes were equally far; both were set to the naive mean.
    Both {
        max_index: usize,
        min_index: usize,
        value: f64,
    },
}

impl Correction {
    /// The value written into the corrected clock(s).
    pub fn value(&self) -> f64 {
        match *self {
            Correction::Max { value, .. }
            | Correction::Min { value, .. }
            | Correction::Both { value, .. } => value,
        }
    }
}

/// Replaces the most divergent clock and reports what changed.
///
/// Extremes resolve to their first occurrence. `None` for an empty slice.
pub fn correct_outlier(clocks: &mut [f64]) -> Option<Correction> {
    let max_index = first_max_index(clocks)?;
    let min_index = first_min_index(clocks)?;
    let n = clocks.len() as f64;
    let naive = clocks.iter().sum::<f64>() / n;

    let max = clocks[max_index];
    let min = clocks[min_index];
    let max_off = (max - naive).abs();
    let min_off = (min - naive).abs();

    let correction = if max_off > min_off {
        let value = (naive * n - max) / (n - 1.0);
        clocks[max_index] = value;
        Correction::Max {
            index: max_index,
            replaced: max,
            value,
        }
    } else if max_off < min_off {
        let value = (naive * n - min) / (n - 1.0);
        clocks[min_index] = value;
        Correction::Min {
            index: min_index,
            replaced: min,
            value,
        }
    } else {
        clocks[max_index] = naive;
        clocks[min_index] = naive;
        Correction::Both {
            max_index,
            min_index,
            value: naive,
        }
    };
    Some(correction)
}

impl StepRule for ClocksAtSeaRule {
    type State = Vec<f64>;
    const NAME: &'static str = "clocks-at-sea";

    fn reset(raw: &[f64]) -> Vec<f64> {
        vec![0.0; raw.len()]
    }

    fn step(clocks: &mut Vec<f64>, raw: &[f64], iteration: u32) -> f64 {
        for (clock, &x) in clocks.iter_mut().zip(raw) {
            *clock += x;
        }
        match correct_outlier(clocks) {
            Some(c) => c.value() / iteration as f64,
            None => f64::NAN,
        }
    }
}
