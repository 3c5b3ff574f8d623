//! Record encoder

use super::EncodedRecord;
use crate::params::ParamSet;
use crate::variant::{Variant, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use std::fmt::Write as _;

/// Exact length of the encoded record for the given inputs.
///
/// Salt and hash are measured in raw bytes; their unpadded base64 expansion
/// is accounted for here.
#[must_use]
pub fn encoded_len(
    variant: Variant,
    version: Version,
    params: &ParamSet,
    salt_len: usize,
    hash_len: usize,
) -> usize {
    // "$" ident "$v=" version "$m=" m ",t=" t ",p=" p "$" salt "$" hash
    1 + variant.ident().len()
        + 3
        + decimal_width(version.number())
        + 3
        + decimal_width(params.m_cost)
        + 3
        + decimal_width(params.t_cost)
        + 3
        + decimal_width(params.parallelism)
        + 1
        + b64_len(salt_len)
        + 1
        + b64_len(hash_len)
}

/// Encode a record for version 19, the version every new hash uses.
///
/// The variant and costs come from `params`; the hash length is whatever
/// `raw_hash` holds.
#[must_use]
pub fn encode(params: &ParamSet, salt: &[u8], raw_hash: &[u8]) -> EncodedRecord {
    encode_with_version(Version::V0x13, params, salt, raw_hash)
}

/// Encode a record for an explicit algorithm version
#[must_use]
pub fn encode_with_version(
    version: Version,
    params: &ParamSet,
    salt: &[u8],
    raw_hash: &[u8],
) -> EncodedRecord {
    let capacity = encoded_len(params.variant, version, params, salt.len(), raw_hash.len());
    let mut out = String::with_capacity(capacity);

    out.push('$');
    out.push_str(params.variant.ident());
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "$v={}$m={},t={},p={}$",
        version.number(),
        params.m_cost,
        params.t_cost,
        params.parallelism
    );
    STANDARD_NO_PAD.encode_string(salt, &mut out);
    out.push('$');
    STANDARD_NO_PAD.encode_string(raw_hash, &mut out);

    debug_assert_eq!(out.len(), capacity);
    EncodedRecord::from_encoded(out)
}

fn decimal_width(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |digits| digits as usize + 1)
}

fn b64_len(bytes: usize) -> usize {
    base64::encoded_len(bytes, false).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_reference_format() {
        let params = ParamSet::new(2, 16, 1, 4, Variant::Argon2i).unwrap();
        let record = encode(&params, b"somesalt", &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(record.as_str(), "$argon2i$v=19$m=16,t=2,p=1$c29tZXNhbHQ$3q2+7w");
    }

    #[test]
    fn length_is_exact() {
        let cases = [
            (Variant::Argon2i, 1, 8, 1, 0usize, 4usize),
            (Variant::Argon2d, 10, 65536, 4, 16, 32),
            (Variant::Argon2id, u32::MAX, u32::MAX, 0x00FF_FFFF, 17, 65),
        ];
        for (variant, t_cost, m_cost, parallelism, salt_len, hash_len) in cases {
            let params = ParamSet {
                t_cost,
                m_cost,
                parallelism,
                hash_len: hash_len as u32,
                variant,
            };
            let salt = vec![0x5a; salt_len];
            let hash = vec![0xa5; hash_len];
            let record = encode(&params, &salt, &hash);
            assert_eq!(
                record.len(),
                encoded_len(variant, Version::V0x13, &params, salt_len, hash_len)
            );
        }
    }

    #[test]
    fn decimal_widths() {
        assert_eq!(decimal_width(0), 1);
        assert_eq!(decimal_width(9), 1);
        assert_eq!(decimal_width(10), 2);
        assert_eq!(decimal_width(u32::MAX), 10);
    }

    #[test]
    fn legacy_version_is_written_explicitly() {
        let params = ParamSet::new(2, 256, 1, 4, Variant::Argon2d).unwrap();
        let record = encode_with_version(Version::V0x10, &params, b"saltsalt", b"hash");
        assert!(record.as_str().starts_with("$argon2d$v=16$m=256,t=2,p=1$"));
    }
}
