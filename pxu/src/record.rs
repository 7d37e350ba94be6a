//! Typed key/value storage behind every unit.

use std::collections::BTreeMap;

use pxu_symbol::Symbol;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::UnitError;

/// Raw field values of one unit, keyed by the unit type's field set.
///
/// Field names are checked against the field set once, at construction.
/// Values are kept verbatim; interpreting them is the job of the unit type
/// and its validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRecord<F: Symbol> {
    values: BTreeMap<F, String>,
}

impl<F: Symbol> Default for UnitRecord<F> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<F: Symbol> UnitRecord<F> {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field name, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::UnknownField`] if a name is not in the field set
    /// and [`UnitError::DuplicateField`] if a name appears twice.
    pub fn from_pairs<I, K, V>(unit: &'static str, pairs: I) -> Result<Self, UnitError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.as_ref();
            let field = F::from_identifier(name).ok_or_else(|| UnitError::UnknownField {
                unit,
                field: name.to_owned(),
            })?;
            if values.insert(field, value.into()).is_some() {
                return Err(UnitError::DuplicateField {
                    unit,
                    field: name.to_owned(),
                });
            }
        }
        Ok(Self { values })
    }

    /// Build a record from a JSON object of string values.
    ///
    /// `null` values are treated as absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::NotAnObject`] if `value` is not an object,
    /// [`UnitError::NonStringValue`] for values that are neither strings nor
    /// `null`, and [`UnitError::UnknownField`] for undeclared field names.
    pub fn from_json(unit: &'static str, value: &Value) -> Result<Self, UnitError> {
        let Value::Object(map) = value else {
            return Err(UnitError::NotAnObject {
                unit,
                found: json_kind(value),
            });
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (name, raw) in map {
            match raw {
                Value::Null => {
                    // Still reject the name if the unit does not declare it.
                    if !F::is_member(name) {
                        return Err(UnitError::UnknownField {
                            unit,
                            field: name.clone(),
                        });
                    }
                }
                Value::String(s) => pairs.push((name.as_str(), s.as_str())),
                other => {
                    return Err(UnitError::NonStringValue {
                        unit,
                        field: name.clone(),
                        found: json_kind(other),
                    });
                }
            }
        }
        Self::from_pairs(unit, pairs)
    }

    /// Set a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, field: F, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// The raw value of `field`, if set.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.values.contains_key(&field)
    }

    /// Set fields in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<F: Symbol> Serialize for UnitRecord<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(field, value)| (field.as_str(), value)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
