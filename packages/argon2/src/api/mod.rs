//! Fluent async API
//!
//! Usage: `Argon2::hash().with_t_cost(3).compute(plain, salt).await`
//!
//! Work runs on tokio's blocking pool; every `compute` must be called from
//! inside a tokio runtime.

pub mod hash_builder;
pub mod verify_builder;

pub use hash_builder::{HashBuilder, HashBuilderWithHandler};
pub use verify_builder::{VerifyBuilder, VerifyBuilderWithHandler};

/// Entry point for the builder API
#[derive(Debug, Clone, Copy)]
pub struct Argon2;

impl Argon2 {
    /// Start a hash operation over the process-wide defaults
    #[must_use]
    pub fn hash() -> HashBuilder {
        HashBuilder::new()
    }

    /// Start a verification
    #[must_use]
    pub fn verify() -> VerifyBuilder {
        VerifyBuilder::new()
    }
}
