mod compute_mean;
mod error;

pub use compute_mean::{ComputeMean, ConvergedBy, MeanReport};
pub use error::TaskError;
