//! Record decoder
//!
//! Positional parse of the `$`-separated segments. Pure text processing;
//! no mixing happens here.

use super::DecodedRecord;
use crate::error::{Argon2Error, Result};
use crate::params::ParamSet;
use crate::variant::{Variant, Version};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use zeroize::Zeroizing;

/// Parse an encoded record.
///
/// A record without a `v=` segment is read as version 16, as the reference
/// decoder does. Integers must be plain decimal without sign or leading
/// zeros, so every accepted record re-encodes to the same text.
///
/// # Errors
///
/// Returns `MalformedRecord` if the algorithm identifier is unknown, a
/// segment is missing or extra, the parameter block is incomplete or out of
/// order, an integer does not parse, a cost is zero, or salt/hash are not
/// unpadded standard base64.
pub fn decode(record: &str) -> Result<DecodedRecord> {
    let body = record
        .strip_prefix('$')
        .ok_or_else(|| Argon2Error::malformed("record must start with '$'"))?;
    let mut segments = body.split('$');

    let ident = segments
        .next()
        .ok_or_else(|| Argon2Error::malformed("missing algorithm identifier"))?;
    let variant = Variant::from_ident(ident).ok_or_else(|| {
        Argon2Error::malformed(format!("unknown algorithm identifier '{ident}'"))
    })?;

    let mut next = segments
        .next()
        .ok_or_else(|| Argon2Error::malformed("missing parameter block"))?;
    let version = match next.strip_prefix("v=") {
        Some(raw) => {
            let number = parse_decimal("v", raw)?;
            next = segments
                .next()
                .ok_or_else(|| Argon2Error::malformed("missing parameter block"))?;
            Version::from_number(number)
                .ok_or_else(|| Argon2Error::malformed(format!("unsupported version {number}")))?
        }
        None => Version::V0x10,
    };

    let (m_cost, t_cost, parallelism) = parse_param_block(next)?;

    let salt_b64 = segments
        .next()
        .ok_or_else(|| Argon2Error::malformed("missing salt segment"))?;
    let hash_b64 = segments
        .next()
        .ok_or_else(|| Argon2Error::malformed("missing hash segment"))?;
    if segments.next().is_some() {
        return Err(Argon2Error::malformed("unexpected trailing segment"));
    }

    let salt = Zeroizing::new(decode_b64("salt", salt_b64)?);
    let hash = Zeroizing::new(decode_b64("hash", hash_b64)?);
    let hash_len = u32::try_from(hash.len())
        .map_err(|_| Argon2Error::malformed("hash segment is too long"))?;

    let params = ParamSet {
        t_cost,
        m_cost,
        parallelism,
        hash_len,
        variant,
    };
    params
        .validate()
        .map_err(|e| Argon2Error::malformed(format!("invalid parameters: {e}")))?;

    Ok(DecodedRecord {
        version,
        params,
        salt,
        hash,
    })
}

/// `m=<u32>,t=<u32>,p=<u32>`, in that order and nothing else
fn parse_param_block(block: &str) -> Result<(u32, u32, u32)> {
    let mut pairs = block.split(',');
    let mut value_of = |key: &str| -> Result<u32> {
        let pair = pairs
            .next()
            .filter(|pair| !pair.is_empty())
            .ok_or_else(|| Argon2Error::malformed(format!("missing '{key}' in parameter block")))?;
        let raw = pair
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or_else(|| {
                Argon2Error::malformed(format!(
                    "expected '{key}=' in parameter block, got '{pair}'"
                ))
            })?;
        parse_decimal(key, raw)
    };

    let m_cost = value_of("m")?;
    let t_cost = value_of("t")?;
    let parallelism = value_of("p")?;
    if pairs.next().is_some() {
        return Err(Argon2Error::malformed("unexpected extra parameter"));
    }
    Ok((m_cost, t_cost, parallelism))
}

fn parse_decimal(key: &str, raw: &str) -> Result<u32> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if !canonical {
        return Err(Argon2Error::malformed(format!(
            "'{key}' is not a decimal integer: '{raw}'"
        )));
    }
    raw.parse::<u32>()
        .map_err(|_| Argon2Error::malformed(format!("'{key}' is out of range: '{raw}'")))
}

fn decode_b64(what: &str, raw: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(raw)
        .map_err(|e| Argon2Error::malformed(format!("{what} is not valid base64: {e}")))
}
