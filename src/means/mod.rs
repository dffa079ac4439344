mod agm;
mod clocks_at_sea;
mod extended_agm;
mod geothdian;

pub use agm::{Agm, AgmRule};
pub use clocks_at_sea::{ClocksAtSea, ClocksAtSeaRule, Correction, correct_outlier};
pub use extended_agm::{ExtendedAgm, split_by_sign};
pub use geothdian::{Geothdian, GeothdianRule};
