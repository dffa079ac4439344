pub mod datasets;
pub mod math;
pub mod parsing;
