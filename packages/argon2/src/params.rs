//! Argon2 cost parameters and per-call overrides
//!
//! `m_cost` is always an absolute memory size in KiB. It is written verbatim
//! into encoded records as `m=<m_cost>`, so a record never needs outside
//! context to be re-verified.

use crate::error::{Argon2Error, Result};
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default number of passes over memory
pub const DEFAULT_T_COST: u32 = 2;

/// Default memory size in KiB (4 MiB)
pub const DEFAULT_M_COST: u32 = 4096;

/// Default number of lanes
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Default raw hash length in bytes
pub const DEFAULT_HASH_LEN: u32 = 32;

/// Largest lane count accepted by the mixing primitive
pub const MAX_LANES: u32 = 0x00FF_FFFF;

/// Recommended salt length in bytes. Not enforced.
pub const RECOMMENDED_SALT_LEN: usize = 16;

fn default_t_cost() -> u32 {
    DEFAULT_T_COST
}

fn default_m_cost() -> u32 {
    DEFAULT_M_COST
}

fn default_parallelism() -> u32 {
    DEFAULT_PARALLELISM
}

fn default_hash_len() -> u32 {
    DEFAULT_HASH_LEN
}

/// Complete set of Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSet {
    /// Number of passes over memory
    #[serde(default = "default_t_cost")]
    pub t_cost: u32,
    /// Memory size in KiB
    #[serde(default = "default_m_cost")]
    pub m_cost: u32,
    /// Number of independent lanes
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Raw hash length in bytes
    #[serde(default = "default_hash_len")]
    pub hash_len: u32,
    /// Mixing variant
    #[serde(default)]
    pub variant: Variant,
}

impl ParamSet {
    /// Built-in defaults
    pub const DEFAULT: Self = Self {
        t_cost: DEFAULT_T_COST,
        m_cost: DEFAULT_M_COST,
        parallelism: DEFAULT_PARALLELISM,
        hash_len: DEFAULT_HASH_LEN,
        variant: Variant::Argon2i,
    };

    /// Create a parameter set, validating every field
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if any numeric field is zero or `parallelism`
    /// exceeds [`MAX_LANES`].
    pub fn new(
        t_cost: u32,
        m_cost: u32,
        parallelism: u32,
        hash_len: u32,
        variant: Variant,
    ) -> Result<Self> {
        let params = Self {
            t_cost,
            m_cost,
            parallelism,
            hash_len,
            variant,
        };
        params.validate()?;
        Ok(params)
    }

    /// Copy with a different variant
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Check the structural invariants.
    ///
    /// Limits owned by the mixing primitive (minimum memory per lane,
    /// minimum output length) are left to it and surface as `HashingFailed`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_field(Field::TCost, self.t_cost)?;
        check_field(Field::MCost, self.m_cost)?;
        check_field(Field::Parallelism, self.parallelism)?;
        check_field(Field::HashLen, self.hash_len)?;
        Ok(())
    }

    /// Read one numeric field
    #[must_use]
    pub fn get(&self, field: Field) -> Option<u32> {
        match field {
            Field::TCost => Some(self.t_cost),
            Field::MCost => Some(self.m_cost),
            Field::Parallelism => Some(self.parallelism),
            Field::HashLen => Some(self.hash_len),
            Field::Variant => None,
        }
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Validate a single numeric field on its own
pub(crate) fn check_field(field: Field, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(Argon2Error::invalid_argument(format!(
            "{field} must be a positive number, got 0"
        )));
    }
    if field == Field::Parallelism && value > MAX_LANES {
        return Err(Argon2Error::invalid_argument(format!(
            "parallelism must not exceed {MAX_LANES}, got {value}"
        )));
    }
    Ok(value)
}

/// Names of the configurable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `t_cost`
    TCost,
    /// `m_cost`
    MCost,
    /// `parallelism`
    Parallelism,
    /// `hash_len`
    HashLen,
    /// `variant`
    Variant,
}

impl Field {
    /// All fields
    pub const ALL: [Field; 5] = [
        Field::TCost,
        Field::MCost,
        Field::Parallelism,
        Field::HashLen,
        Field::Variant,
    ];

    /// Field name as used in option tables
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TCost => "t_cost",
            Self::MCost => "m_cost",
            Self::Parallelism => "parallelism",
            Self::HashLen => "hash_len",
            Self::Variant => "variant",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Argon2Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Argon2Error::invalid_argument(format!("unknown option '{s}'")))
    }
}

/// Per-call overrides; absent fields fall back to the active defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashOptions {
    /// Override for `t_cost`
    pub t_cost: Option<u32>,
    /// Override for `m_cost` (KiB)
    pub m_cost: Option<u32>,
    /// Override for `parallelism`
    pub parallelism: Option<u32>,
    /// Override for `hash_len`
    pub hash_len: Option<u32>,
    /// Override for `variant`
    pub variant: Option<Variant>,
}

impl HashOptions {
    /// Empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override `t_cost`
    #[must_use]
    pub fn t_cost(mut self, t_cost: u32) -> Self {
        self.t_cost = Some(t_cost);
        self
    }

    /// Override `m_cost` (KiB)
    #[must_use]
    pub fn m_cost(mut self, m_cost: u32) -> Self {
        self.m_cost = Some(m_cost);
        self
    }

    /// Override `parallelism`
    #[must_use]
    pub fn parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = Some(parallelism);
        self
    }

    /// Override `hash_len`
    #[must_use]
    pub fn hash_len(mut self, hash_len: u32) -> Self {
        self.hash_len = Some(hash_len);
        self
    }

    /// Override `variant`
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// True when no field is overridden
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the overrides over a copy of `defaults`.
    ///
    /// `defaults` is taken by value, so the caller's instance is never
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if an override is zero or the merged set
    /// fails [`ParamSet::validate`].
    pub fn resolve(&self, defaults: ParamSet) -> Result<ParamSet> {
        let mut effective = defaults;
        if let Some(t_cost) = self.t_cost {
            effective.t_cost = check_field(Field::TCost, t_cost)?;
        }
        if let Some(m_cost) = self.m_cost {
            effective.m_cost = check_field(Field::MCost, m_cost)?;
        }
        if let Some(parallelism) = self.parallelism {
            effective.parallelism = check_field(Field::Parallelism, parallelism)?;
        }
        if let Some(hash_len) = self.hash_len {
            effective.hash_len = check_field(Field::HashLen, hash_len)?;
        }
        if let Some(variant) = self.variant {
            effective.variant = variant;
        }
        effective.validate()?;
        Ok(effective)
    }

    /// Parse an untyped option table such as `{"t_cost": 4, "variant": "d"}`.
    ///
    /// `null` means "not set". Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the input is not a JSON object, a numeric
    /// option is not a positive integer, or `variant` is not a known tag.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            Argon2Error::invalid_argument(format!("options are not valid JSON: {e}"))
        })?;
        Self::from_value(&value)
    }

    /// Same as [`from_json`](Self::from_json) on an already parsed value
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn from_value(value: &Value) -> Result<Self> {
        let table = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(table) => table,
            other => {
                return Err(Argon2Error::invalid_argument(format!(
                    "expected options to be a table, got {}",
                    json_type_name(other)
                )));
            }
        };

        let mut options = Self::default();
        for field in Field::ALL {
            let Some(raw) = table.get(field.name()) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }
            match field {
                Field::TCost => options.t_cost = Some(integer_option(field, raw)?),
                Field::MCost => options.m_cost = Some(integer_option(field, raw)?),
                Field::Parallelism => options.parallelism = Some(integer_option(field, raw)?),
                Field::HashLen => options.hash_len = Some(integer_option(field, raw)?),
                Field::Variant => options.variant = Some(variant_option(raw)?),
            }
        }
        Ok(options)
    }
}

/// Coerce an untyped value into a validated numeric field
pub(crate) fn integer_option(field: Field, raw: &Value) -> Result<u32> {
    let Value::Number(number) = raw else {
        return Err(Argon2Error::invalid_argument(format!(
            "expected {field} to be a number, got {}",
            json_type_name(raw)
        )));
    };
    let value = number
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            Argon2Error::invalid_argument(format!(
                "expected {field} to be a positive 32-bit integer, got {number}"
            ))
        })?;
    check_field(field, value)
}

/// Coerce an untyped value into a variant tag
pub(crate) fn variant_option(raw: &Value) -> Result<Variant> {
    match raw {
        Value::String(tag) => tag.parse(),
        other => Err(Argon2Error::invalid_argument(format!(
            "expected variant to be a string, got {}",
            json_type_name(other)
        ))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let params = ParamSet::default();
        assert_eq!(params.t_cost, 2);
        assert_eq!(params.m_cost, 4096);
        assert_eq!(params.parallelism, 1);
        assert_eq!(params.hash_len, 32);
        assert_eq!(params.variant, Variant::Argon2i);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_fields_are_rejected() {
        for field in [Field::TCost, Field::MCost, Field::Parallelism, Field::HashLen] {
            let mut params = ParamSet::default();
            match field {
                Field::TCost => params.t_cost = 0,
                Field::MCost => params.m_cost = 0,
                Field::Parallelism => params.parallelism = 0,
                Field::HashLen => params.hash_len = 0,
                Field::Variant => unreachable!(),
            }
            let err = params.validate().unwrap_err();
            assert!(err.is_invalid_argument());
            assert!(err.to_string().contains(field.name()));
        }
    }

    #[test]
    fn lane_limit_is_enforced() {
        let err = ParamSet::new(2, u32::MAX, MAX_LANES + 1, 32, Variant::Argon2i).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn resolve_leaves_defaults_untouched() {
        let defaults = ParamSet::default();
        let options = HashOptions::new().t_cost(5).variant(Variant::Argon2id);
        let effective = options.resolve(defaults).unwrap();

        assert_eq!(effective.t_cost, 5);
        assert_eq!(effective.variant, Variant::Argon2id);
        assert_eq!(effective.m_cost, defaults.m_cost);
        assert_eq!(defaults, ParamSet::default());
    }

    #[test]
    fn resolve_rejects_zero_override() {
        let err = HashOptions::new().hash_len(0).resolve(ParamSet::default()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn option_table_parsing() {
        let options =
            HashOptions::from_json(r#"{"t_cost": 4, "m_cost": 16, "variant": "d", "extra": true}"#)
                .unwrap();
        assert_eq!(options.t_cost, Some(4));
        assert_eq!(options.m_cost, Some(16));
        assert_eq!(options.parallelism, None);
        assert_eq!(options.variant, Some(Variant::Argon2d));

        assert!(HashOptions::from_json("null").unwrap().is_empty());
        assert!(HashOptions::from_json(r#"{"hash_len": null}"#).unwrap().is_empty());
    }

    #[test]
    fn option_table_type_errors() {
        let err = HashOptions::from_json(r#"{"t_cost": "4"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected t_cost to be a number, got string"
        );

        let err = HashOptions::from_json(r#"{"variant": 2}"#).unwrap_err();
        assert!(err.to_string().contains("expected variant to be a string"));

        assert!(HashOptions::from_json(r#"{"variant": "argon2x"}"#).is_err());
        assert!(HashOptions::from_json(r#"{"m_cost": -1}"#).is_err());
        assert!(HashOptions::from_json(r#"{"m_cost": 1.5}"#).is_err());
        assert!(HashOptions::from_json(r#"{"parallelism": 0}"#).is_err());
        assert!(HashOptions::from_json("[1, 2]").is_err());
        assert!(HashOptions::from_json("{").is_err());
    }

    #[test]
    fn param_set_deserializes_with_field_defaults() {
        let params: ParamSet =
            serde_json::from_str(r#"{"m_cost": 65536, "variant": "id"}"#).unwrap();
        assert_eq!(params.m_cost, 65536);
        assert_eq!(params.variant, Variant::Argon2id);
        assert_eq!(params.t_cost, DEFAULT_T_COST);
        assert_eq!(params.hash_len, DEFAULT_HASH_LEN);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("hash_len".parse::<Field>().unwrap(), Field::HashLen);
        assert!("salt_len".parse::<Field>().unwrap_err().is_invalid_argument());
    }
}
