pub mod dashboard;
pub mod login;
pub mod sheet;
pub mod stats_grid;
pub mod upload_zone;
