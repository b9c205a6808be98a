// Library exports for the gym site
// This allows integration tests to build the router in-process

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod forms;
pub mod routes;
pub mod state;
pub mod weekday;
