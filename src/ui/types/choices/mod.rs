mod mean_choice;
mod schema;
mod ui_choice;

pub use mean_choice::*;
pub use schema::*;
pub use ui_choice::UIChoice;
