//! Verify builder

use crate::async_result::{AsyncArgon2Result, AsyncArgon2ResultWithHandler};
use crate::error::Result;
use crate::verifier::{Verification, Verifier};
use zeroize::Zeroizing;

/// Starts a verification
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyBuilder;

/// Verify builder with a result handler
pub struct VerifyBuilderWithHandler<F> {
    handler: F,
}

impl VerifyBuilder {
    /// New builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hand the outcome to `handler` instead of returning it
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> VerifyBuilderWithHandler<F>
    where
        F: FnOnce(Result<Verification>) -> T + Unpin,
    {
        VerifyBuilderWithHandler { handler }
    }

    /// Check `plain` against `record`
    pub fn compute<R, P>(self, record: R, plain: P) -> AsyncArgon2Result<Verification>
    where
        R: Into<String>,
        P: Into<Vec<u8>>,
    {
        let record = record.into();
        let plain = Zeroizing::new(plain.into());
        AsyncArgon2Result::spawn_blocking(move || Verifier::new().verify(&record, &plain))
    }
}

impl<F, T> VerifyBuilderWithHandler<F>
where
    F: FnOnce(Result<Verification>) -> T + Unpin,
{
    /// Check `plain` against `record` and resolve to the handler's output
    pub fn compute<R, P>(self, record: R, plain: P) -> AsyncArgon2ResultWithHandler<Verification, F>
    where
        R: Into<String>,
        P: Into<Vec<u8>>,
    {
        VerifyBuilder.compute(record, plain).on_result(self.handler)
    }
}
