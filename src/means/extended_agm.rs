use crate::core::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION, Mean, MeanError, validate_dataset,
    validate_precision,
};
use crate::means::Agm;
use std::ops::Index;
use tracing::debug;

/// AGM over signed data.
///
/// The dataset is split into the magnitudes of its negative values and its
/// non-negative values (zeros land in both), each half gets its own
/// [`Agm`], and the result is `positive - negative`. A half with no values
/// contributes 0.
#[derive(Debug, Clone)]
pub struct ExtendedAgm {
    raw: Vec<f64>,
    negatives: Option<Agm>,
    positives: Option<Agm>,
    precision: f64,
    max_iterations: u32,
    mean: f64,
}

/// Splits signed data into `(negative magnitudes, non-negatives)`.
pub fn split_by_sign(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut negatives = Vec::new();
    let mut positives = Vec::new();
    for &x in data {
        if x == 0.0 {
            negatives.push(0.0);
            positives.push(0.0);
        } else if x < 0.0 {
            negatives.push(x.abs());
        } else {
            positives.push(x);
        }
    }
    (negatives, positives)
}

fn sub_mean(values: Vec<f64>) -> Result<Option<Agm>, MeanError> {
    if values.is_empty() {
        Ok(None)
    } else {
        Agm::new(values).map(Some)
    }
}

impl ExtendedAgm {
    pub fn new(data: Vec<f64>) -> Result<Self, MeanError> {
        validate_dataset(&data)?;
        let (negatives, positives) = split_by_sign(&data);
        Ok(Self {
            negatives: sub_mean(negatives)?,
            positives: sub_mean(positives)?,
            raw: data,
            precision: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            mean: f64::NAN,
        })
    }

    /// Magnitudes of the negative values (plus zeros), in input order.
    pub fn negatives(&self) -> &[f64] {
        match &self.negatives {
            Some(m) => m.data(),
            None => &[],
        }
    }

    /// Non-negative values, in input order.
    pub fn positives(&self) -> &[f64] {
        match &self.positives {
            Some(m) => m.data(),
            None => &[],
        }
    }

    pub fn negative_mean(&self) -> f64 {
        self.negatives.as_ref().map_or(0.0, |m| m.mean())
    }

    pub fn positive_mean(&self) -> f64 {
        self.positives.as_ref().map_or(0.0, |m| m.mean())
    }

    pub fn data(&self) -> &[f64] {
        &self.raw
    }
}

impl Mean for ExtendedAgm {
    fn name(&self) -> &'static str {
        "extended-agm"
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
        let mut negative = 0.0;
        let mut positive = 0.0;
        if let Some(m) = self.negatives.as_mut() {
            m.set_precision(self.precision)?;
            m.set_max_iterations(self.max_iterations);
            negative = m.calculate()?;
        }
        if let Some(m) = self.positives.as_mut() {
            m.set_precision(self.precision)?;
            m.set_max_iterations(self.max_iterations);
            positive = m.calculate()?;
        }
        self.mean = positive - negative;
        debug!(negative, positive, mean = self.mean, "extended agm converged");
        Ok(self.mean)
    }

    /// Precision is not propagated here: depth-bounded runs ignore it.
    fn calculate_to_depth(&mut self, depth: u32) -> f64 {
        let negative = self
            .negatives
            .as_mut()
            .map_or(0.0, |m| m.calculate_to_depth(depth));
        let positive = self
            .positives
            .as_mut()
            .map_or(0.0, |m| m.calculate_to_depth(depth));
        self.mean = positive - negative;
        self.mean
    }

    fn size(&self) -> usize {
        self.raw.len()
    }

    fn get(&self, index: usize) -> Option<f64> {
        self.raw.get(index).copied()
    }

    /// The larger of the two sub-computation counters.
    fn iterations(&self) -> u32 {
        let n = self.negatives.as_ref().map_or(0, |m| m.iterations());
        let p = self.positives.as_ref().map_or(0, |m| m.iterations());
        n.max(p)
    }

    fn mean(&self) -> f64 {
        self.mean
    }
}

impl Index<usize> for ExtendedAgm {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.raw[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::datasets::uniform_dataset;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn agm_of(data: Vec<f64>) -> f64 {
        Agm::new(data).unwrap().calculate().unwrap()
    }

    #[test]
    fn zero_goes_to_both_halves() {
        let e = ExtendedAgm::new(vec![-3.0, -1.0, 0.0, 2.0, 4.0]).unwrap();
        assert_eq!(e.negatives(), &[3.0, 1.0, 0.0]);
        assert_eq!(e.positives(), &[0.0, 2.0, 4.0]);
        assert_eq!(e.size(), 5);
        assert_eq!(e[0], -3.0);
        assert_eq!(e.get(4), Some(4.0));
    }

    #[test]
    fn result_is_positive_minus_negative() {
        let mut e = ExtendedAgm::new(vec![-3.0, -1.0, 0.0, 2.0, 4.0]).unwrap();
        let m = e.calculate().unwrap();
        let want = agm_of(vec![0.0, 2.0, 4.0]) - agm_of(vec![3.0, 1.0, 0.0]);
        assert_eq!(m.to_bits(), want.to_bits());
        assert_eq!(e.mean(), m);
        assert_eq!(m, e.positive_mean() - e.negative_mean());
    }

    #[test]
    fn zero_free_signed_data() {
        let mut e = ExtendedAgm::new(vec![-8.0, 1.0, -2.0, 4.0]).unwrap();
        let m = e.calculate().unwrap();
        let want = agm_of(vec![1.0, 4.0]) - agm_of(vec![8.0, 2.0]);
        assert!(approx_eq(m, want, 1e-15));
        assert!(m < 0.0);
    }

    #[test]
    fn all_positive_matches_plain_agm() {
        let data = vec![1.1, 0.2, 0.3, 1.0];
        let mut e = ExtendedAgm::new(data.clone()).unwrap();
        assert!(e.negatives().is_empty());
        assert_eq!(e.calculate().unwrap(), agm_of(data));
        assert_eq!(e.negative_mean(), 0.0);
    }

    #[test]
    fn all_negative_is_mirrored_agm() {
        let mut e = ExtendedAgm::new(vec![-1.0, -2.0]).unwrap();
        let m = e.calculate().unwrap();
        assert!(approx_eq(m, -1.456_791_031_046_906_8, 1e-9));
        assert!(e.positives().is_empty());
    }

    #[test]
    fn precision_is_propagated_to_both_halves() {
        let mut e = ExtendedAgm::new(vec![-1.0, -9.0, 2.0, 50.0]).unwrap();
        e.set_precision(0.5).unwrap();
        e.calculate().unwrap();
        let loose = e.iterations();
        e.set_precision(1e-12).unwrap();
        e.calculate().unwrap();
        assert!(e.iterations() > loose);
        assert!(e.set_precision(0.0).is_err());
    }

    #[test]
    fn depth_runs_each_half_exactly_depth_steps() {
        let mut e = ExtendedAgm::new(vec![-1.0, -4.0, 2.0, 8.0]).unwrap();
        let m = e.calculate_to_depth(1);
        // seeds (2, 2.5) and (4, 5); one step averages each pair
        let neg = (2.0 + 2.5) / 2.0;
        let pos = (4.0 + 5.0) / 2.0;
        assert!(approx_eq(m, pos - neg, 1e-12));
        assert_eq!(e.iterations(), 1);
    }

    #[test]
    fn depth_runs_are_bitwise_reproducible() {
        let data = uniform_dataset(7, 10, -5.0..5.0);
        let mut a = ExtendedAgm::new(data.clone()).unwrap();
        let mut b = ExtendedAgm::new(data).unwrap();
        assert_eq!(
            a.calculate_to_depth(6).to_bits(),
            b.calculate_to_depth(6).to_bits()
        );
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert_eq!(
            ExtendedAgm::new(vec![]).unwrap_err(),
            MeanError::EmptyDataset
        );
        assert!(ExtendedAgm::new(vec![-1.0, f64::NEG_INFINITY]).is_err());
    }

    #[test]
    fn iteration_cap_applies_to_halves() {
        let mut e = ExtendedAgm::new(vec![-3.0, 0.0, 5.0]).unwrap();
        e.set_max_iterations(3);
        assert!(matches!(
            e.calculate(),
            Err(MeanError::IterationLimit { limit: 3, .. })
        ));
    }
}
