pub mod common;
pub mod config;
pub mod domain;
pub mod fingerprint;
pub mod gate;
pub mod index;
pub mod observability;
pub mod ports;
pub mod store;

pub use common::error::{Result, VigilError};
pub use domain::*;
pub use fingerprint::Fingerprint;
pub use gate::{DuplicateOracle, SubmissionGate};
