//! Retry module
//! - policy.rs: bounded policy-based retries with backoff and jitter

mod policy;

pub use policy::*;
