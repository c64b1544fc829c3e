//! Latency benchmark for row-oriented key-value stores.
//!
//! A [`Runner`] drives a [`StoreClient`] through named [`Scenario`]s and
//! records the duration of every phase into a caller-owned [`TimingBatch`].

pub mod admin;
pub mod config;
pub mod error;
pub mod local;
pub mod remote;
pub mod report;
pub mod rows;
pub mod scenario;
pub mod store;
pub mod timing;

pub use admin::Admin;
pub use config::{BenchConfig, Cli};
pub use error::{AdminError, BenchError, ConfigError, StoreError};
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use scenario::{Runner, Scenario, ScenarioOutcome};
pub use store::StoreClient;
pub use timing::{TimingBatch, TimingRecord};
