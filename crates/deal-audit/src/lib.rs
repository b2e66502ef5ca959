//! Readiness auditing for programmatic advertising deals.

pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;
