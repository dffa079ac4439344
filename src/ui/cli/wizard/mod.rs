#[allow(clippy::module_inception)]
mod wizard;

pub use wizard::{collect_params, prompt_choice};
