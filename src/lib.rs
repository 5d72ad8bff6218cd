pub mod config;
pub mod display;
pub mod errors;
pub mod executor;
pub mod logging;
pub mod registry;
pub mod report;
pub mod runner;
pub mod types;
