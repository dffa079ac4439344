use crate::core::{IterativeMean, MeanError, StepRule, validate_non_negative};
use crate::utils::math::{arithmetic_mean, geometric_mean, median_of_sorted};

/// Geometric/arithmetic/median blend (the "GMDN").
///
/// Each step sorts the three working values, keeps the middle one as the
/// new median and replaces the others with the geometric and arithmetic
/// means of the triple. The estimate is the median.
pub type Geothdian = IterativeMean<GeothdianRule>;

/// Working state: `[geometric, arithmetic, median]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeothdianRule;

impl StepRule for GeothdianRule {
    type State = [f64; 3];
    const NAME: &'static str = "geothdian";

    fn validate(data: &[f64]) -> Result<(), MeanError> {
        validate_non_negative(data)
    }

    fn reset(raw: &[f64]) -> [f64; 3] {
        let mut sorted = raw.to_vec();
        sorted.sort_by(f64::total_cmp);
        [
            geometric_mean(&sorted),
            arithmetic_mean(&sorted),
            median_of_sorted(&sorted),
        ]
    }

    fn step(state: &mut [f64; 3], _raw: &[f64], _iteration: u32) -> f64 {
        state.sort_by(f64::total_cmp);
        let median = state[1];
        *state = [geometric_mean(state), arithmetic_mean(state), median];
        median
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mean;
    use crate::utils::datasets::uniform_dataset;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn published_gmdn_value() {
        // GMDN(1, 1, 2, 3, 5) ~= 2.089
        let mut g = Geothdian::new(vec![1.0, 1.0, 2.0, 3.0, 5.0]).unwrap();
        let m = g.calculate().unwrap();
        assert!(approx_eq(m, 2.089_057_803_502_329_5, 1e-8), "m={m}");
    }

    #[test]
    fn sample_dataset_value() {
        let mut g = Geothdian::new(vec![1.1, 0.2, 0.3, 1.0]).unwrap();
        let m = g.calculate().unwrap();
        assert!(approx_eq(m, 0.612_981_320_722_391_6, 1e-8), "m={m}");
    }

    #[test]
    fn odd_length_seeds_middle_of_sorted_copy() {
        let mut g = Geothdian::new(vec![5.0, 1.0, 3.0, 2.0, 1.0]).unwrap();
        g.reset();
        let [geo, arith, median] = *g.working_state().unwrap();
        assert_eq!(median, 2.0);
        assert!(approx_eq(arith, 2.4, 1e-12));
        assert!(approx_eq(geo, libm::pow(30.0, 0.2), 1e-12));
    }

    #[test]
    fn even_length_seeds_average_of_central_pair() {
        let mut g = Geothdian::new(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        g.reset();
        assert_eq!(g.working_state().unwrap()[2], 2.5);
    }

    #[test]
    fn dataset_keeps_input_order() {
        let mut g = Geothdian::new(vec![3.0, 1.0, 2.0]).unwrap();
        g.calculate().unwrap();
        assert_eq!(g.data(), &[3.0, 1.0, 2.0]);
        assert_eq!(g[0], 3.0);
    }

    #[test]
    fn first_step_returns_median_of_seed_triple() {
        // seed (~1.93, 2.4, 2) sorts to (1.93, 2, 2.4)
        let mut g = Geothdian::new(vec![1.0, 1.0, 2.0, 3.0, 5.0]).unwrap();
        assert_eq!(g.calculate_to_depth(1), 2.0);
        let [_, arith, median] = *g.working_state().unwrap();
        assert_eq!(median, 2.0);
        assert!(arith > 2.0 && arith < 2.2);
    }

    #[test]
    fn ties_in_the_triple_need_no_special_handling() {
        // even seed gives median == arithmetic == 2.5
        let mut g = Geothdian::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(g.calculate_to_depth(1), 2.5);
        let m = g.calculate().unwrap();
        assert!(m > 2.2 && m <= 2.5, "m={m}");
    }

    #[test]
    fn single_and_equal_values_converge_immediately() {
        let mut g = Geothdian::new(vec![2.0]).unwrap();
        assert!(approx_eq(g.calculate().unwrap(), 2.0, 1e-12));
        assert_eq!(g.iterations(), 2);

        let mut g = Geothdian::new(vec![7.0, 7.0]).unwrap();
        assert!(approx_eq(g.calculate().unwrap(), 7.0, 1e-12));
        assert_eq!(g.iterations(), 2);
    }

    #[test]
    fn long_datasets_seed_a_finite_geometric_mean() {
        let mut g = Geothdian::new(vec![1e3; 200]).unwrap();
        g.reset();
        let [geo, _, _] = *g.working_state().unwrap();
        assert!(approx_eq(geo, 1e3, 1e-9), "geo={geo}");
        assert!(approx_eq(g.calculate().unwrap(), 1e3, 1e-9));

        let mut g = Geothdian::new(vec![0.1; 400]).unwrap();
        assert!(approx_eq(g.calculate().unwrap(), 0.1, 1e-12));
    }

    #[test]
    fn depth_runs_are_bitwise_reproducible() {
        let data = uniform_dataset(5, 11, 0.5..20.0);
        let mut a = Geothdian::new(data.clone()).unwrap();
        let mut b = Geothdian::new(data).unwrap();
        a.record_trace(true);
        b.record_trace(true);
        assert_eq!(
            a.calculate_to_depth(8).to_bits(),
            b.calculate_to_depth(8).to_bits()
        );

        let ra = a.trace().unwrap().records();
        let rb = b.trace().unwrap().records();
        assert_eq!(ra.len(), 8);
        for (x, y) in ra.iter().zip(rb) {
            assert_eq!(x.iteration, y.iteration);
            assert_eq!(x.estimate.to_bits(), y.estimate.to_bits());
            assert_eq!(x.difference.to_bits(), y.difference.to_bits());
        }
    }

    #[test]
    fn rejects_negative_values() {
        assert!(matches!(
            Geothdian::new(vec![1.0, -1.0]),
            Err(MeanError::NegativeValue { index: 1, .. })
        ));
    }

    #[test]
    fn seeded_datasets_stay_within_bounds() {
        for seed in 0..20 {
            let data = uniform_dataset(seed, 9, 0.5..20.0);
            let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let m = Geothdian::new(data).unwrap().calculate().unwrap();
            assert!(m >= lo && m <= hi, "seed={seed}, m={m}");
        }
    }
}
