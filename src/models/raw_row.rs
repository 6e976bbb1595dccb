//! Raw payroll row model.
//!
//! A [`RawRow`] is one employee's record from a payroll extract, keyed by the
//! extract's column codes (`GROSS`, `BASIC_P`, `TEACH2`, ...). Values are kept
//! untyped as [`RawValue`]s; interpretation happens in the normalizer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An untyped scalar as found in a payroll extract.
///
/// Deserializes from any JSON scalar without a tag, so `{"GROSS": "12,500"}`,
/// `{"GROSS": 12500}` and `{"GROSS": null}` are all accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// An explicit null (a blank numeric column in the extract).
    Null,
    /// A logical column value.
    Bool(bool),
    /// An integral number.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Text, possibly numeric with thousands separators.
    Text(String),
}

impl RawValue {
    /// Returns the value as display text, or `None` if it carries nothing
    /// worth showing (null, blank text, zero, `false`).
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_engine::models::RawValue;
    ///
    /// assert_eq!(RawValue::from("  A. Mary  ").display_text(), Some("A. Mary".to_string()));
    /// assert_eq!(RawValue::from("   ").display_text(), None);
    /// assert_eq!(RawValue::Null.display_text(), None);
    /// ```
    pub fn display_text(&self) -> Option<String> {
        match self {
            RawValue::Null | RawValue::Bool(false) => None,
            RawValue::Bool(true) => Some("True".to_string()),
            RawValue::Integer(0) => None,
            RawValue::Integer(n) => Some(n.to_string()),
            RawValue::Float(f) if *f == 0.0 || f.is_nan() => None,
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// One employee's record for one pay period, keyed by column code.
///
/// A column that is not present is *absent*, which is distinct from an
/// explicit [`RawValue::Null`] only for display purposes; both normalize to
/// zero.
///
/// # Examples
///
/// ```
/// use payslip_engine::models::{RawRow, RawValue};
///
/// let row = RawRow::new()
///     .with("NAME", "A. Mary")
///     .with("GROSS", "12,500.00")
///     .with("PF", 1200);
///
/// assert_eq!(row.get("PF"), Some(&RawValue::Integer(1200)));
/// assert!(row.get("TEACH").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: HashMap<String, RawValue>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row with `code` set to `value`.
    pub fn with(mut self, code: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.fields.insert(code.into(), value.into());
        self
    }

    /// Sets `code` to `value`, replacing any previous value.
    pub fn insert(&mut self, code: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(code.into(), value.into());
    }

    /// Looks up a column by code.
    pub fn get(&self, code: &str) -> Option<&RawValue> {
        self.fields.get(code)
    }

    /// Number of columns present in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the row carries no columns at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the columns in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(code, value)| (code.as_str(), value))
    }
}

impl From<HashMap<String, RawValue>> for RawRow {
    fn from(fields: HashMap<String, RawValue>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(code, value)| (code.into(), value.into()))
                .collect(),
        }
    }
}
