pub mod config;
pub mod error;
pub mod probe;
pub mod stats;
pub mod worker;

pub use config::Endpoint;
pub use error::Error;
pub use probe::{CheckResult, Prober};
pub use stats::{DomainStats, StatsTracker};
pub use worker::monitor;
