//! Declarative spec loading
//!
//! A spec is a JSON array of descriptors, each
//! `[box_id, operator_name, page, ...args]`. Descriptors are resolved against
//! the closed [`OperatorKind`] registry; nothing in the input is executed.

use crate::operator::Operator;
use crate::registry::OperatorKind;
use crate::{BoxId, FillError, PageIndex, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Operators registered for each box
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spec {
    boxes: BTreeMap<BoxId, Vec<Operator>>,
}

impl Spec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a spec from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(&document)
    }

    /// Load a spec from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a spec from an already parsed descriptor list
    pub fn from_value(document: &Value) -> Result<Self> {
        let entries = document
            .as_array()
            .ok_or_else(|| FillError::InvalidSpec("spec must be a JSON array".to_string()))?;

        let mut spec = Self::new();
        for (index, entry) in entries.iter().enumerate() {
            let (box_id, operator) = parse_descriptor(entry).map_err(|e| match e {
                FillError::InvalidSpec(msg) => FillError::InvalidSpec(format!("entry {index}: {msg}")),
                other => other,
            })?;
            spec.push(box_id, operator);
        }

        log::debug!(
            "Loaded spec: {} descriptors, {} boxes",
            entries.len(),
            spec.len()
        );
        Ok(spec)
    }

    /// Register an operator under a box, after any already registered
    pub fn push(&mut self, box_id: BoxId, operator: Operator) {
        self.boxes.entry(box_id).or_default().push(operator);
    }

    /// Operators registered for a box
    pub fn get(&self, box_id: BoxId) -> Option<&[Operator]> {
        self.boxes.get(&box_id).map(Vec::as_slice)
    }

    /// Number of boxes with at least one operator
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterate over boxes in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (BoxId, &[Operator])> {
        self.boxes.iter().map(|(id, ops)| (*id, ops.as_slice()))
    }

    /// Pages referenced by any operator
    pub fn pages(&self) -> BTreeSet<PageIndex> {
        self.boxes
            .values()
            .flatten()
            .map(Operator::page)
            .collect()
    }
}

fn parse_descriptor(entry: &Value) -> Result<(BoxId, Operator)> {
    let fields = entry
        .as_array()
        .ok_or_else(|| FillError::InvalidSpec("descriptor is not an array".to_string()))?;

    if fields.len() < 3 {
        return Err(FillError::InvalidSpec(format!(
            "descriptor has {} elements, expected at least 3",
            fields.len()
        )));
    }

    let box_id = as_index(&fields[0], "box id")?;
    let name = fields[1]
        .as_str()
        .ok_or_else(|| FillError::InvalidSpec("operator name is not a string".to_string()))?;
    let kind = OperatorKind::from_name(name)?;
    let page = as_index(&fields[2], "page")?;

    let args = fields[3..]
        .iter()
        .map(|arg| {
            arg.as_f64().ok_or_else(|| {
                FillError::InvalidSpec(format!("{name}: argument {arg} is not a number"))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok((box_id, kind.build(page, &args)?))
}

fn as_index(value: &Value, what: &str) -> Result<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| FillError::InvalidSpec(format!("{what} {value} is not a non-negative integer")))
}
