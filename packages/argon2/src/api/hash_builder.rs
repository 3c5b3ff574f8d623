//! Hash builder

use crate::async_result::{AsyncArgon2Result, AsyncArgon2ResultWithHandler};
use crate::defaults::defaults;
use crate::encoding::EncodedRecord;
use crate::error::Result;
use crate::hasher::{generate_salt, Hasher};
use crate::params::{HashOptions, RECOMMENDED_SALT_LEN};
use crate::variant::Variant;
use zeroize::Zeroizing;

/// Collects per-call overrides for a hash operation
#[derive(Debug, Clone, Copy, Default)]
pub struct HashBuilder {
    options: HashOptions,
}

/// Hash builder with a result handler
pub struct HashBuilderWithHandler<F> {
    builder: HashBuilder,
    handler: F,
}

impl HashBuilder {
    /// Builder with no overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all overrides at once
    #[must_use]
    pub fn with_options(mut self, options: HashOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of passes
    #[must_use]
    pub fn with_t_cost(mut self, t_cost: u32) -> Self {
        self.options = self.options.t_cost(t_cost);
        self
    }

    /// Memory cost in KiB
    #[must_use]
    pub fn with_m_cost(mut self, m_cost: u32) -> Self {
        self.options = self.options.m_cost(m_cost);
        self
    }

    /// Number of lanes
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.options = self.options.parallelism(parallelism);
        self
    }

    /// Raw hash length in bytes
    #[must_use]
    pub fn with_hash_len(mut self, hash_len: u32) -> Self {
        self.options = self.options.hash_len(hash_len);
        self
    }

    /// Argon2 variant
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.options = self.options.variant(variant);
        self
    }

    /// Overrides collected so far
    #[must_use]
    pub fn options(&self) -> &HashOptions {
        &self.options
    }

    /// Hand the result to `handler` instead of returning it
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> HashBuilderWithHandler<F>
    where
        F: FnOnce(Result<EncodedRecord>) -> T + Unpin,
    {
        HashBuilderWithHandler {
            builder: self,
            handler,
        }
    }

    /// Hash `plain` with `salt`.
    ///
    /// The process-wide defaults are read when this is called; changing
    /// them afterwards does not affect the pending hash.
    pub fn compute<P, S>(self, plain: P, salt: S) -> AsyncArgon2Result<EncodedRecord>
    where
        P: Into<Vec<u8>>,
        S: Into<Vec<u8>>,
    {
        let params = match self.options.resolve(defaults().snapshot()) {
            Ok(params) => params,
            Err(e) => return AsyncArgon2Result::error(e),
        };
        let plain = Zeroizing::new(plain.into());
        let salt = salt.into();
        AsyncArgon2Result::spawn_blocking(move || {
            Hasher::global().hash_with(&plain, &salt, &params)
        })
    }

    /// Hash `plain` with a fresh random salt of the recommended length
    pub fn compute_with_random_salt<P>(self, plain: P) -> AsyncArgon2Result<EncodedRecord>
    where
        P: Into<Vec<u8>>,
    {
        self.compute(plain, generate_salt(RECOMMENDED_SALT_LEN))
    }
}

impl<F, T> HashBuilderWithHandler<F>
where
    F: FnOnce(Result<EncodedRecord>) -> T + Unpin,
{
    /// Hash `plain` with `salt` and resolve to the handler's output
    pub fn compute<P, S>(self, plain: P, salt: S) -> AsyncArgon2ResultWithHandler<EncodedRecord, F>
    where
        P: Into<Vec<u8>>,
        S: Into<Vec<u8>>,
    {
        self.builder.compute(plain, salt).on_result(self.handler)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Argon2;
    use crate::variant::Variant;

    #[tokio::test]
    async fn builder_overrides_reach_the_record() {
        let record = Argon2::hash()
            .with_t_cost(1)
            .with_m_cost(16)
            .with_hash_len(16)
            .with_variant(Variant::Argon2id)
            .compute("password", "somesalt")
            .await
            .unwrap();
        assert!(record.as_str().starts_with("$argon2id$v=19$m=16,t=1,p=1$c29tZXNhbHQ$"));
        assert_eq!(record.decode().unwrap().hash.len(), 16);
    }

    #[tokio::test]
    async fn invalid_override_fails_without_spawning() {
        let err = Argon2::hash()
            .with_parallelism(0)
            .compute("password", "somesalt")
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn handler_sees_the_record() {
        let ok = Argon2::hash()
            .with_t_cost(1)
            .with_m_cost(16)
            .on_result(|r| r.is_ok())
            .compute("password", "somesalt")
            .await;
        assert!(ok);
    }

    #[tokio::test]
    async fn random_salt_is_recorded() {
        let record = Argon2::hash()
            .with_t_cost(1)
            .with_m_cost(16)
            .compute_with_random_salt("password")
            .await
            .unwrap();
        assert_eq!(record.decode().unwrap().salt.len(), crate::RECOMMENDED_SALT_LEN);
    }
}
