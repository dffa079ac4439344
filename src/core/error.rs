use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeanError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("value {value} at index {index} is not finite")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("value {value} at index {index} is negative; use ExtendedAgm for signed data")]
    NegativeValue { index: usize, value: f64 },

    #[error("precision must be > 0, got {0}")]
    InvalidPrecision(f64),

    #[error("no convergence after {limit} iterations (last difference {last_difference})")]
    IterationLimit { limit: u32, last_difference: f64 },

    #[error("index {index} out of range for dataset of size {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Rejects empty datasets and NaN/Inf values.
pub(crate) fn validate_dataset(data: &[f64]) -> Result<(), MeanError> {
    if data.is_empty() {
        return Err(MeanError::EmptyDataset);
    }
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(MeanError::NonFiniteValue {
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}

/// [`validate_dataset`] plus a rejection of negative values, for means that
/// take geometric means of the raw data.
pub(crate) fn validate_non_negative(data: &[f64]) -> Result<(), MeanError> {
    validate_dataset(data)?;
    match data.iter().position(|&x| x < 0.0) {
        Some(index) => Err(MeanError::NegativeValue {
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}

#[inline]
pub(crate) fn validate_precision(precision: f64) -> Result<f64, MeanError> {
    if precision > 0.0 {
        Ok(precision)
    } else {
        Err(MeanError::InvalidPrecision(precision))
    }
}
