pub mod calculators;
pub mod config;
pub mod error;
pub mod leads;
pub mod report;
pub mod telemetry;
