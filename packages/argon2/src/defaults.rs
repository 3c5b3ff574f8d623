//! Process-wide default parameters
//!
//! Readers take a whole-`ParamSet` snapshot in one atomic load, so a reader
//! never observes half of a concurrent update. Writers publish a fresh copy
//! through `rcu`, which retries on contention instead of losing an update.

use crate::error::{Argon2Error, Result};
use crate::params::{check_field, integer_option, variant_option, Field, ParamSet};
use crate::variant::Variant;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

static GLOBAL_DEFAULTS: Lazy<Defaults> = Lazy::new(Defaults::default);

/// Shared process-wide defaults, initialised to [`ParamSet::DEFAULT`]
#[must_use]
pub fn defaults() -> &'static Defaults {
    &GLOBAL_DEFAULTS
}

/// Dynamic setter on the process-wide defaults, for host bindings.
///
/// See [`Defaults::set_default`].
///
/// # Errors
///
/// Returns `InvalidArgument` for an unknown field or an unacceptable value.
pub fn set_default(field: &str, value: &Value) -> Result<FieldValue> {
    GLOBAL_DEFAULTS.set_default(field.parse()?, value)
}

/// Value stored in a configurable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Numeric field
    Number(u32),
    /// The variant field
    Variant(Variant),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Variant(v) => f.write_str(v.tag()),
        }
    }
}

/// Mutable default parameter set shared between callers
pub struct Defaults {
    current: ArcSwap<ParamSet>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(ParamSet::DEFAULT),
        }
    }
}

impl fmt::Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults")
            .field("current", &self.snapshot())
            .finish()
    }
}

impl Defaults {
    /// Independent defaults starting from `params`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `params` fails validation.
    pub fn new(params: ParamSet) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            current: ArcSwap::from_pointee(params),
        })
    }

    /// Copy of the current parameter set
    #[must_use]
    pub fn snapshot(&self) -> ParamSet {
        **self.current.load()
    }

    /// Replace every field at once
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `params` fails validation.
    pub fn replace(&self, params: ParamSet) -> Result<()> {
        params.validate()?;
        self.current.store(Arc::new(params));
        tracing::debug!(?params, "Argon2 defaults replaced");
        Ok(())
    }

    /// Restore the built-in defaults
    pub fn reset(&self) {
        self.current.store(Arc::new(ParamSet::DEFAULT));
    }

    /// Get, or set and get, the default `t_cost`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero.
    pub fn t_cost(&self, value: Option<u32>) -> Result<u32> {
        self.numeric(Field::TCost, value)
    }

    /// Get, or set and get, the default `m_cost` (KiB)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero.
    pub fn m_cost(&self, value: Option<u32>) -> Result<u32> {
        self.numeric(Field::MCost, value)
    }

    /// Get, or set and get, the default `parallelism`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero or above the lane limit.
    pub fn parallelism(&self, value: Option<u32>) -> Result<u32> {
        self.numeric(Field::Parallelism, value)
    }

    /// Get, or set and get, the default `hash_len`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero.
    pub fn hash_len(&self, value: Option<u32>) -> Result<u32> {
        self.numeric(Field::HashLen, value)
    }

    /// Get, or set and get, the default variant
    pub fn variant(&self, value: Option<Variant>) -> Variant {
        match value {
            Some(variant) => {
                self.current.rcu(|current| current.with_variant(variant));
                tracing::debug!(%variant, "Argon2 default variant updated");
                variant
            }
            None => self.snapshot().variant,
        }
    }

    /// Set a field from an untyped value.
    ///
    /// Numeric fields require a JSON number holding a positive 32-bit
    /// integer; `variant` requires one of the tags `i`, `d`, `id`. `null`
    /// leaves the field unchanged and returns the current value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the value has the wrong type or range.
    pub fn set_default(&self, field: Field, value: &Value) -> Result<FieldValue> {
        if field == Field::Variant {
            let variant = match value {
                Value::Null => None,
                raw => Some(variant_option(raw)?),
            };
            return Ok(FieldValue::Variant(self.variant(variant)));
        }

        let number = match value {
            Value::Null => None,
            raw => Some(integer_option(field, raw)?),
        };
        self.numeric(field, number).map(FieldValue::Number)
    }

    fn numeric(&self, field: Field, value: Option<u32>) -> Result<u32> {
        let Some(value) = value else {
            return self
                .snapshot()
                .get(field)
                .ok_or_else(|| Argon2Error::invalid_argument(format!("{field} is not numeric")));
        };

        check_field(field, value)?;
        self.current.rcu(|current| {
            let mut next = **current;
            match field {
                Field::TCost => next.t_cost = value,
                Field::MCost => next.m_cost = value,
                Field::Parallelism => next.parallelism = value,
                Field::HashLen => next.hash_len = value,
                Field::Variant => {}
            }
            next
        });
        tracing::debug!(field = field.name(), value, "Argon2 default updated");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HashOptions;
    use serde_json::json;

    #[test]
    fn getters_without_argument_return_current_value() {
        let defaults = Defaults::default();
        assert_eq!(defaults.t_cost(None).unwrap(), 2);
        assert_eq!(defaults.m_cost(None).unwrap(), 4096);
        assert_eq!(defaults.parallelism(None).unwrap(), 1);
        assert_eq!(defaults.hash_len(None).unwrap(), 32);
        assert_eq!(defaults.variant(None), Variant::Argon2i);
    }

    #[test]
    fn setters_store_and_return_value() {
        let defaults = Defaults::default();
        assert_eq!(defaults.t_cost(Some(4)).unwrap(), 4);
        assert_eq!(defaults.variant(Some(Variant::Argon2d)), Variant::Argon2d);
        let snapshot = defaults.snapshot();
        assert_eq!(snapshot.t_cost, 4);
        assert_eq!(snapshot.variant, Variant::Argon2d);
        assert_eq!(snapshot.m_cost, 4096);
    }

    #[test]
    fn invalid_values_leave_state_untouched() {
        let defaults = Defaults::default();
        assert!(defaults.m_cost(Some(0)).unwrap_err().is_invalid_argument());
        assert!(defaults.parallelism(Some(u32::MAX)).is_err());
        assert_eq!(defaults.snapshot(), ParamSet::DEFAULT);
    }

    #[test]
    fn dynamic_setter_checks_types() {
        let defaults = Defaults::default();
        assert_eq!(
            defaults.set_default(Field::HashLen, &json!(64)).unwrap(),
            FieldValue::Number(64)
        );
        assert_eq!(
            defaults.set_default(Field::Variant, &json!("id")).unwrap(),
            FieldValue::Variant(Variant::Argon2id)
        );
        assert_eq!(
            defaults.set_default(Field::TCost, &Value::Null).unwrap(),
            FieldValue::Number(2)
        );

        let err = defaults.set_default(Field::TCost, &json!("four")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected t_cost to be a number, got string"
        );
        assert!(defaults.set_default(Field::Variant, &json!(1)).is_err());
        assert!(defaults.set_default(Field::Variant, &json!("argon3")).is_err());
        assert!(defaults.set_default(Field::MCost, &json!(-8)).is_err());
    }

    #[test]
    fn setter_and_option_table_report_the_same_errors() {
        let defaults = Defaults::default();
        for (field, raw) in [
            (Field::TCost, json!("four")),
            (Field::MCost, json!(-8)),
            (Field::HashLen, json!(0)),
            (Field::Variant, json!(1)),
            (Field::Variant, json!("argon3")),
        ] {
            let from_setter = defaults.set_default(field, &raw).unwrap_err();
            let table = serde_json::Map::from_iter([(field.name().to_owned(), raw)]);
            let from_table = HashOptions::from_value(&Value::Object(table)).unwrap_err();
            assert_eq!(from_setter.to_string(), from_table.to_string());
        }
        assert_eq!(defaults.snapshot(), ParamSet::DEFAULT);
    }

    #[test]
    fn concurrent_setters_do_not_lose_updates() {
        let defaults = Arc::new(Defaults::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let defaults = Arc::clone(&defaults);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            defaults.t_cost(Some(7)).unwrap();
                        } else {
                            defaults.m_cost(Some(8192)).unwrap();
                        }
                        let snapshot = defaults.snapshot();
                        assert!(snapshot.validate().is_ok());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let snapshot = defaults.snapshot();
        assert_eq!(snapshot.t_cost, 7);
        assert_eq!(snapshot.m_cost, 8192);
    }

    #[test]
    fn replace_and_reset() {
        let defaults = Defaults::new(ParamSet::DEFAULT).unwrap();
        let custom = ParamSet::new(3, 65536, 4, 16, Variant::Argon2id).unwrap();
        defaults.replace(custom).unwrap();
        assert_eq!(defaults.snapshot(), custom);
        defaults.reset();
        assert_eq!(defaults.snapshot(), ParamSet::DEFAULT);
    }
}
