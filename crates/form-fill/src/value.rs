//! Box values and their coercions
//!
//! Values arrive as JSON scalars. Each operator coerces the value it is
//! given into the type it formats; coercion failures are `Format` errors.

use crate::{BoxId, FillError, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// Values keyed by box id, in the order they were supplied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSet {
    entries: IndexMap<BoxId, Value>,
}

impl ValueSet {
    /// Top-level key holding the box values in a values document
    pub const ROOT_KEY: &'static str = "ct600";

    /// Create an empty value set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a value set from (box id, value) pairs
    ///
    /// A repeated box id replaces the earlier value in place.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (BoxId, Value)>,
    {
        let mut values = Self::new();
        for (box_id, value) in pairs {
            values.insert(box_id, value);
        }
        values
    }

    /// Parse a values document, e.g. `{"ct600": {"1": "Test Co", "145": 11218.0}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(&document)
    }

    /// Read the box values from an already parsed values document
    pub fn from_value(document: &Value) -> Result<Self> {
        let boxes = document
            .get(Self::ROOT_KEY)
            .ok_or_else(|| {
                FillError::InvalidValues(format!("missing top-level \"{}\" key", Self::ROOT_KEY))
            })?
            .as_object()
            .ok_or_else(|| {
                FillError::InvalidValues(format!("\"{}\" is not an object", Self::ROOT_KEY))
            })?;

        let mut values = Self::new();
        for (key, value) in boxes {
            let box_id: BoxId = key.trim().parse().map_err(|_| {
                FillError::InvalidValues(format!("box id {key:?} is not an integer"))
            })?;

            if value.is_array() || value.is_object() {
                return Err(FillError::InvalidValues(format!(
                    "box {box_id} holds a non-scalar value"
                )));
            }

            values.insert(box_id, value.clone());
        }

        Ok(values)
    }

    /// Set the value of a box, keeping its original position if already present
    pub fn insert(&mut self, box_id: BoxId, value: Value) {
        self.entries.insert(box_id, value);
    }

    /// Get the value of a box
    pub fn get(&self, box_id: BoxId) -> Option<&Value> {
        self.entries.get(&box_id)
    }

    /// Iterate over (box id, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BoxId, &Value)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Check if a JSON value is truthy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Coerce a value to a finite float
///
/// Strings are parsed after trimming surrounding whitespace.
pub fn to_float(value: &Value) -> Result<f64> {
    let f = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FillError::Format(format!("{n} is not representable as a float"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FillError::Format(format!("{s:?} is not a number"))),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(FillError::Format(format!("{other} is not a number"))),
    }?;

    if !f.is_finite() {
        return Err(FillError::Format(format!("{value} is not a finite number")));
    }
    Ok(f)
}

/// Coerce a value to an integer
///
/// Floats are truncated toward zero; strings must hold an integer literal.
pub fn to_int(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i),
            None => truncate(to_float(value)?),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| FillError::Format(format!("{s:?} is not an integer"))),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(FillError::Format(format!("{other} is not an integer"))),
    }
}

/// Integer part of a float, truncated toward zero
pub fn truncate(value: f64) -> Result<i64> {
    // 2^63 is exactly representable; anything at or beyond it overflows
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if !value.is_finite() || value.trunc() >= LIMIT || value.trunc() < -LIMIT {
        return Err(FillError::Format(format!(
            "{value} cannot be converted to an integer"
        )));
    }
    Ok(value.trunc() as i64)
}
