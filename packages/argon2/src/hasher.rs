//! Hash service: resolve parameters, mix, encode

use crate::defaults::{defaults, Defaults};
use crate::encoding::{encode, EncodedRecord};
use crate::error::Result;
use crate::mixer::{output_buffer, Argon2Mixer, Mixer};
use crate::params::{HashOptions, ParamSet, RECOMMENDED_SALT_LEN};
use crate::variant::Version;
use rand::RngCore;

/// Hash `plain` with `salt` against the process-wide defaults.
///
/// Shorthand for [`Hasher::global`] followed by [`Hasher::hash`].
///
/// # Errors
///
/// Returns `InvalidArgument` for a bad override, or `HashingFailed` when the
/// primitive rejects the effective parameters.
pub fn hash(plain: &[u8], salt: &[u8], options: Option<&HashOptions>) -> Result<EncodedRecord> {
    Hasher::global().hash(plain, salt, options)
}

/// Random salt of `len` bytes from the thread-local CSPRNG
#[must_use]
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// Produces encoded records from a plain text and a salt
#[derive(Debug, Clone)]
pub struct Hasher<'d, M = Argon2Mixer> {
    mixer: M,
    defaults: &'d Defaults,
}

impl Hasher<'static, Argon2Mixer> {
    /// Hasher over the process-wide defaults
    #[must_use]
    pub fn global() -> Self {
        Self::new(defaults())
    }
}

impl<'d> Hasher<'d, Argon2Mixer> {
    /// Hasher over an explicit set of defaults
    #[must_use]
    pub fn new(defaults: &'d Defaults) -> Self {
        Self::with_mixer(Argon2Mixer, defaults)
    }
}

impl<'d, M: Mixer> Hasher<'d, M> {
    /// Hasher with a custom mixing primitive
    #[must_use]
    pub fn with_mixer(mixer: M, defaults: &'d Defaults) -> Self {
        Self { mixer, defaults }
    }

    /// The defaults this hasher resolves against
    #[must_use]
    pub fn defaults(&self) -> &'d Defaults {
        self.defaults
    }

    /// Hash with the current defaults, overridden field by field by
    /// `options`.
    ///
    /// The defaults are read once, as a snapshot; `options` only ever touch
    /// that local copy. An empty salt is passed through and left for the
    /// primitive to reject.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if an override is out of range, or
    /// `HashingFailed` if the primitive fails.
    pub fn hash(
        &self,
        plain: &[u8],
        salt: &[u8],
        options: Option<&HashOptions>,
    ) -> Result<EncodedRecord> {
        let snapshot = self.defaults.snapshot();
        let params = match options {
            Some(options) => options.resolve(snapshot)?,
            None => snapshot,
        };
        self.hash_with(plain, salt, &params)
    }

    /// Hash with a fully specified parameter set, ignoring the defaults
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `params` is invalid, or `HashingFailed`
    /// if the primitive fails.
    pub fn hash_with(&self, plain: &[u8], salt: &[u8], params: &ParamSet) -> Result<EncodedRecord> {
        params.validate()?;
        if salt.len() < RECOMMENDED_SALT_LEN {
            tracing::debug!(
                salt_len = salt.len(),
                recommended = RECOMMENDED_SALT_LEN,
                "salt shorter than recommended"
            );
        }

        let mut raw = output_buffer(params.hash_len)?;
        self.mixer
            .mix(Version::V0x13, params, plain, salt, &mut raw)
            .inspect_err(|e| tracing::debug!(error = %e, ?params, "Argon2 mixing failed"))?;

        tracing::debug!(
            variant = %params.variant,
            t_cost = params.t_cost,
            m_cost = params.m_cost,
            parallelism = params.parallelism,
            hash_len = params.hash_len,
            "Argon2 hash computed"
        );
        Ok(encode(params, salt, &raw))
    }
}
