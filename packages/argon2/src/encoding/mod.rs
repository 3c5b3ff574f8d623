//! Canonical text encoding of Argon2 hash records
//!
//! ```text
//! $argon2<i|d|id>$v=19$m=<m_cost>,t=<t_cost>,p=<parallelism>$<salt>$<hash>
//! ```
//!
//! Salt and hash use the standard base64 alphabet without padding. The
//! format is byte-compatible with the PHC reference encoder.

pub mod decoder;
pub mod encoder;

pub use decoder::decode;
pub use encoder::{encode, encode_with_version, encoded_len};

use crate::error::{Argon2Error, Result};
use crate::params::ParamSet;
use crate::variant::{Variant, Version};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// A self-describing encoded hash record
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedRecord(String);

impl EncodedRecord {
    /// Wrap text produced by the encoder
    pub(crate) fn from_encoded(text: String) -> Self {
        Self(text)
    }

    /// The record text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the record into its parts
    ///
    /// # Errors
    ///
    /// Never fails for records produced by this crate; records built through
    /// `FromStr` were validated on construction.
    pub fn decode(&self) -> Result<DecodedRecord> {
        decode(&self.0)
    }

    /// Length of the record text in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a valid record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the record text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for EncodedRecord {
    type Err = Argon2Error;

    /// Accept text only if it decodes
    fn from_str(s: &str) -> Result<Self> {
        decode(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for EncodedRecord {
    type Error = Argon2Error;

    fn try_from(text: String) -> Result<Self> {
        decode(&text)?;
        Ok(Self(text))
    }
}

impl From<EncodedRecord> for String {
    fn from(record: EncodedRecord) -> Self {
        record.0
    }
}

impl AsRef<str> for EncodedRecord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EncodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedRecord").field(&self.0).finish()
    }
}

/// The parts of a decoded record
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Algorithm version; `V0x10` when the record carries no `v=` segment
    pub version: Version,
    /// Cost parameters and variant; `hash_len` is the length of `hash`
    pub params: ParamSet,
    /// Raw salt bytes
    pub salt: Zeroizing<Vec<u8>>,
    /// Raw hash bytes
    pub hash: Zeroizing<Vec<u8>>,
}

impl DecodedRecord {
    /// Variant named by the record
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.params.variant
    }

    /// Re-encode, preserving the record's version
    #[must_use]
    pub fn encode(&self) -> EncodedRecord {
        encode_with_version(self.version, &self.params, &self.salt, &self.hash)
    }
}

impl fmt::Debug for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedRecord")
            .field("version", &self.version)
            .field("params", &self.params)
            .field("salt_len", &self.salt.len())
            .field("hash_len", &self.hash.len())
            .finish()
    }
}
