pub mod password;
pub mod week;

pub use week::{arrival_year, arrival_week};
