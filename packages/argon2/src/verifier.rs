//! Verify service: decode, re-mix, compare in constant time

use crate::encoding::{decode, DecodedRecord};
use crate::error::{Argon2Error, Result};
use crate::mixer::{output_buffer, Argon2Mixer, Mixer};
use crate::variant::Variant;
use subtle::ConstantTimeEq;

/// Check `plain` against an encoded record with the default mixer
///
/// # Errors
///
/// Returns `MalformedRecord` if the record does not decode, or
/// `HashingFailed` if the primitive rejects the decoded parameters. A wrong
/// password is `Ok(Verification::Mismatch)`.
pub fn verify(record: &str, plain: &[u8]) -> Result<Verification> {
    Verifier::new().verify(record, plain)
}

/// Byte-slice equality whose running time does not depend on the contents.
///
/// Lengths are treated as public: slices of different length compare unequal
/// straight away.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Successful outcome of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verification {
    /// The plain text produced the recorded hash
    Match,
    /// The record is sound but the plain text is wrong
    Mismatch,
}

impl Verification {
    /// True for [`Verification::Match`]
    #[must_use]
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

impl From<Verification> for bool {
    fn from(outcome: Verification) -> Self {
        outcome.is_match()
    }
}

/// Checks plain texts against encoded records
#[derive(Debug, Clone, Default)]
pub struct Verifier<M = Argon2Mixer> {
    mixer: M,
}

impl Verifier<Argon2Mixer> {
    /// Verifier backed by the `argon2` crate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Mixer> Verifier<M> {
    /// Verifier with a custom mixing primitive
    #[must_use]
    pub fn with_mixer(mixer: M) -> Self {
        Self { mixer }
    }

    /// Decode `record` and check `plain` against it.
    ///
    /// Everything needed to recompute the hash comes from the record itself.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` or `HashingFailed`; never for a wrong
    /// password.
    pub fn verify(&self, record: &str, plain: &[u8]) -> Result<Verification> {
        let decoded = decode(record).inspect_err(|e| {
            tracing::debug!(
                error = %e,
                sniffed_variant = %Variant::sniff(record),
                "rejected encoded record"
            );
        })?;
        self.verify_decoded(&decoded, plain)
    }

    /// Check `plain` against an already decoded record.
    ///
    /// The candidate is always as long as `record.hash`; `params.hash_len`
    /// is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if the stored hash is too long to describe,
    /// or `HashingFailed` if the primitive rejects the record's parameters.
    pub fn verify_decoded(&self, record: &DecodedRecord, plain: &[u8]) -> Result<Verification> {
        let expected = record.hash.as_slice();
        let expected_len = u32::try_from(expected.len())
            .map_err(|_| Argon2Error::malformed("hash segment is too long"))?;
        let mut candidate = output_buffer(expected_len)?;
        self.mixer
            .mix(
                record.version,
                &record.params,
                plain,
                &record.salt,
                &mut candidate,
            )
            .inspect_err(|e| {
                tracing::debug!(error = %e, params = ?record.params, "Argon2 mixing failed");
            })?;

        let outcome = if constant_time_eq(&candidate, expected) {
            Verification::Match
        } else {
            Verification::Mismatch
        };
        tracing::debug!(
            variant = %record.variant(),
            version = record.version.number(),
            matched = outcome.is_match(),
            "Argon2 verification finished"
        );
        Ok(outcome)
    }
}
