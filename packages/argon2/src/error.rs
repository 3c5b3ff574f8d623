//! Error handling for Argon2 hashing and verification

use thiserror::Error;

/// Argon2-specific errors
///
/// A password mismatch is not represented here: it is the successful
/// outcome [`Verification::Mismatch`](crate::Verification::Mismatch).
#[derive(Debug, Error)]
pub enum Argon2Error {
    /// A configuration value or call parameter was rejected before any mixing work
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An encoded record could not be parsed
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The mixing primitive reported a failure
    #[error("Hashing failed: {0}")]
    HashingFailed(#[from] MixingError),

    /// A background task went away before producing a result
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Argon2Error {
    /// Create an `InvalidArgument` error
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a `MalformedRecord` error
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the failure came from a bad configuration or call parameter
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// True when the encoded record itself was unusable
    #[must_use]
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord(_))
    }

    /// True when the mixing primitive failed
    #[must_use]
    pub fn is_hashing_failed(&self) -> bool {
        matches!(self, Self::HashingFailed(_))
    }
}

/// Failure codes reported by the mixing primitive.
///
/// One variant per error code of the underlying implementation, plus
/// `MemoryAllocation` for a working area the allocator refused. The display
/// text is the primitive's own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MixingError {
    /// Associated data is too long
    #[error("associated data is too long")]
    AdTooLong,
    /// Algorithm identifier invalid
    #[error("algorithm identifier invalid")]
    AlgorithmInvalid,
    /// Base64 encoding rejected by the primitive
    #[error("B64 encoding invalid")]
    B64Encoding,
    /// Key ID is too long
    #[error("key ID is too long")]
    KeyIdTooLong,
    /// Memory cost below the minimum (8 KiB per lane)
    #[error("memory cost is too small")]
    MemoryTooLittle,
    /// Memory cost above the maximum
    #[error("memory cost is too large")]
    MemoryTooMuch,
    /// The working memory for the requested cost could not be allocated
    #[error("memory allocation error")]
    MemoryAllocation,
    /// Requested output shorter than the minimum
    #[error("output is too short")]
    OutputTooShort,
    /// Requested output longer than the maximum
    #[error("output is too long")]
    OutputTooLong,
    /// Password is too long
    #[error("password is too long")]
    PwdTooLong,
    /// Salt shorter than the minimum
    #[error("salt is too short")]
    SaltTooShort,
    /// Salt is too long
    #[error("salt is too long")]
    SaltTooLong,
    /// Secret is too long
    #[error("secret is too long")]
    SecretTooLong,
    /// Parallelism below one lane
    #[error("not enough threads")]
    ThreadsTooFew,
    /// Parallelism above the lane limit
    #[error("too many threads")]
    ThreadsTooMany,
    /// Time cost below one pass
    #[error("time cost is too small")]
    TimeTooSmall,
    /// Unsupported algorithm version
    #[error("invalid version")]
    VersionInvalid,
}

impl From<argon2::Error> for MixingError {
    fn from(err: argon2::Error) -> Self {
        match err {
            argon2::Error::AdTooLong => Self::AdTooLong,
            argon2::Error::AlgorithmInvalid => Self::AlgorithmInvalid,
            argon2::Error::B64Encoding(_) => Self::B64Encoding,
            argon2::Error::KeyIdTooLong => Self::KeyIdTooLong,
            argon2::Error::MemoryTooLittle => Self::MemoryTooLittle,
            argon2::Error::MemoryTooMuch => Self::MemoryTooMuch,
            argon2::Error::OutputTooShort => Self::OutputTooShort,
            argon2::Error::OutputTooLong => Self::OutputTooLong,
            argon2::Error::PwdTooLong => Self::PwdTooLong,
            argon2::Error::SaltTooShort => Self::SaltTooShort,
            argon2::Error::SaltTooLong => Self::SaltTooLong,
            argon2::Error::SecretTooLong => Self::SecretTooLong,
            argon2::Error::ThreadsTooFew => Self::ThreadsTooFew,
            argon2::Error::ThreadsTooMany => Self::ThreadsTooMany,
            argon2::Error::TimeTooSmall => Self::TimeTooSmall,
            argon2::Error::VersionInvalid => Self::VersionInvalid,
        }
    }
}

/// Result type for Argon2 operations
pub type Result<T> = std::result::Result<T, Argon2Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_messages_are_forwarded_verbatim() {
        let primitive = argon2::Error::ThreadsTooMany;
        let err = Argon2Error::from(MixingError::from(primitive));
        assert!(err.is_hashing_failed());
        assert_eq!(err.to_string(), format!("Hashing failed: {primitive}"));
    }

    #[test]
    fn classification_helpers_are_exclusive() {
        let malformed = Argon2Error::malformed("missing salt");
        assert!(malformed.is_malformed_record());
        assert!(!malformed.is_hashing_failed());
        assert!(!malformed.is_invalid_argument());

        let invalid = Argon2Error::invalid_argument("t_cost must be positive");
        assert!(invalid.is_invalid_argument());
        assert!(!invalid.is_malformed_record());
    }
}
