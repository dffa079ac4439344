mod error;
mod means;

pub use error::BuildError;

pub use means::{build_mean, load_choice};
