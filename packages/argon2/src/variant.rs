//! Argon2 variants and algorithm versions

use crate::error::{Argon2Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Argon2 variant selecting the mixing sub-algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Data-independent addressing
    #[default]
    #[serde(rename = "i", alias = "argon2i")]
    Argon2i,
    /// Data-dependent addressing
    #[serde(rename = "d", alias = "argon2d")]
    Argon2d,
    /// Hybrid: data-independent first half pass, data-dependent afterwards
    #[serde(rename = "id", alias = "argon2id")]
    Argon2id,
}

impl Variant {
    /// All variants, in declaration order
    pub const ALL: [Variant; 3] = [Variant::Argon2i, Variant::Argon2d, Variant::Argon2id];

    /// Short tag used in option tables: `i`, `d` or `id`
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Argon2i => "i",
            Self::Argon2d => "d",
            Self::Argon2id => "id",
        }
    }

    /// Algorithm identifier as it appears in an encoded record
    #[must_use]
    pub const fn ident(self) -> &'static str {
        match self {
            Self::Argon2i => "argon2i",
            Self::Argon2d => "argon2d",
            Self::Argon2id => "argon2id",
        }
    }

    /// Parse an algorithm identifier (`argon2i`, `argon2d`, `argon2id`).
    ///
    /// Exact match only.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.ident() == ident)
    }

    /// Legacy variant inference by substring search over a whole record.
    ///
    /// Older bindings picked the verification variant this way before the
    /// record was parsed. [`decode`](crate::decode) never uses it. `argon2id`
    /// is checked first because `argon2i` is a prefix of it; anything that
    /// matches neither `argon2id` nor `argon2d` falls back to `argon2i`.
    #[must_use]
    pub fn sniff(record: &str) -> Self {
        if record.contains(Self::Argon2id.ident()) {
            Self::Argon2id
        } else if record.contains(Self::Argon2d.ident()) {
            Self::Argon2d
        } else {
            Self::Argon2i
        }
    }
}

impl FromStr for Variant {
    type Err = Argon2Error;

    /// Accepts either the short tag or the full identifier
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.tag() == s || v.ident() == s)
            .ok_or_else(|| {
                Argon2Error::invalid_argument(format!(
                    "unknown Argon2 variant '{s}', expected one of i, d, id"
                ))
            })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

impl From<Variant> for argon2::Algorithm {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Argon2i => argon2::Algorithm::Argon2i,
            Variant::Argon2d => argon2::Algorithm::Argon2d,
            Variant::Argon2id => argon2::Algorithm::Argon2id,
        }
    }
}

/// Argon2 algorithm version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    /// Version 1.0 (16), assumed for records without a `v=` segment
    V0x10,
    /// Version 1.3 (19), used for every new record
    #[default]
    V0x13,
}

impl Version {
    /// Numeric value written after `v=`
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::V0x10 => 0x10,
            Self::V0x13 => 0x13,
        }
    }

    /// Map a decoded `v=` value onto a supported version
    #[must_use]
    pub const fn from_number(n: u32) -> Option<Self> {
        match n {
            0x10 => Some(Self::V0x10),
            0x13 => Some(Self::V0x13),
            _ => None,
        }
    }
}

impl From<Version> for argon2::Version {
    fn from(version: Version) -> Self {
        match version {
            Version::V0x10 => argon2::Version::V0x10,
            Version::V0x13 => argon2::Version::V0x13,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_and_identifiers() {
        assert_eq!("i".parse::<Variant>().unwrap(), Variant::Argon2i);
        assert_eq!("id".parse::<Variant>().unwrap(), Variant::Argon2id);
        assert_eq!("argon2d".parse::<Variant>().unwrap(), Variant::Argon2d);
        assert!("x".parse::<Variant>().unwrap_err().is_invalid_argument());
        assert!("ID".parse::<Variant>().is_err());
    }

    #[test]
    fn from_ident_is_exact() {
        assert_eq!(Variant::from_ident("argon2id"), Some(Variant::Argon2id));
        assert_eq!(Variant::from_ident("argon2"), None);
        assert_eq!(Variant::from_ident("argon2idx"), None);
    }

    #[test]
    fn sniff_checks_longest_tag_first() {
        assert_eq!(Variant::sniff("$argon2id$v=19$m=16,t=2,p=1$c2FsdA$aGFzaA"), Variant::Argon2id);
        assert_eq!(Variant::sniff("$argon2d$v=19$m=16,t=2,p=1$c2FsdA$aGFzaA"), Variant::Argon2d);
        assert_eq!(Variant::sniff("$argon2i$v=19$m=16,t=2,p=1$c2FsdA$aGFzaA"), Variant::Argon2i);
        assert_eq!(Variant::sniff("garbage"), Variant::Argon2i);
    }

    #[test]
    fn serde_uses_short_tags() {
        let json = serde_json::to_string(&Variant::Argon2id).unwrap();
        assert_eq!(json, "\"id\"");
        let parsed: Variant = serde_json::from_str("\"argon2d\"").unwrap();
        assert_eq!(parsed, Variant::Argon2d);
    }

    #[test]
    fn versions_round_trip_through_numbers() {
        assert_eq!(Version::from_number(19), Some(Version::V0x13));
        assert_eq!(Version::from_number(16), Some(Version::V0x10));
        assert_eq!(Version::from_number(18), None);
        assert_eq!(Version::default().number(), 19);
    }
}
