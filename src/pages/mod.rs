pub mod analytics;
pub mod dashboard;
pub mod network;
pub mod not_found;
