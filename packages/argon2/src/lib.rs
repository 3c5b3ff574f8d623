//! Argon2 password hashing with self-describing encoded records
//!
//! Hash a password into a PHC-format record, then verify candidates against
//! that record alone:
//!
//! ```
//! use cryypt_argon2::{hash, verify, HashOptions, Variant, Verification};
//!
//! let options = HashOptions::new().t_cost(2).m_cost(16).variant(Variant::Argon2id);
//! let record = hash(b"password", b"somesalt", Some(&options))?;
//! assert!(record.as_str().starts_with("$argon2id$v=19$m=16,t=2,p=1$"));
//!
//! assert_eq!(verify(record.as_str(), b"password")?, Verification::Match);
//! assert_eq!(verify(record.as_str(), b"wrong")?, Verification::Mismatch);
//! # Ok::<(), cryypt_argon2::Argon2Error>(())
//! ```
//!
//! `m_cost` is the absolute memory cost in KiB. A wrong password is the
//! successful outcome [`Verification::Mismatch`]; errors are reserved for bad
//! arguments, malformed records and primitive failures.

#![forbid(unsafe_code)]

pub mod api;
pub mod async_result;
pub mod defaults;
pub mod encoding;
pub mod error;
pub mod hasher;
pub mod mixer;
pub mod params;
pub mod variant;
pub mod verifier;

pub use api::{Argon2, HashBuilder, VerifyBuilder};
pub use async_result::{AsyncArgon2Result, AsyncArgon2ResultWithHandler};
pub use defaults::{defaults, set_default, Defaults, FieldValue};
pub use encoding::{decode, encode, encode_with_version, encoded_len, DecodedRecord, EncodedRecord};
pub use error::{Argon2Error, MixingError, Result};
pub use hasher::{generate_salt, hash, Hasher};
pub use mixer::{Argon2Mixer, Mixer};
pub use params::{
    Field, HashOptions, ParamSet, DEFAULT_HASH_LEN, DEFAULT_M_COST, DEFAULT_PARALLELISM,
    DEFAULT_T_COST, MAX_LANES, RECOMMENDED_SALT_LEN,
};
pub use variant::{Variant, Version};
pub use verifier::{constant_time_eq, verify, Verification, Verifier};
