pub mod statistics;
pub mod timereport;

pub use statistics::statistics_routes;
pub use timereport::timereport_routes;
