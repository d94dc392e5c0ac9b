//! Binding box values to spec operators

use crate::operator::Operator;
use crate::spec::Spec;
use crate::value::ValueSet;
use crate::PageIndex;
use serde_json::Value;
use std::collections::BTreeMap;

/// An operator paired with the value it will draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation<'a> {
    pub operator: &'a Operator,
    pub value: &'a Value,
}

/// Annotations grouped by the page their operator draws on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageAnnotations<'a> {
    pages: BTreeMap<PageIndex, Vec<Annotation<'a>>>,
}

impl<'a> PageAnnotations<'a> {
    /// Annotations for a page, in value-set order
    pub fn get(&self, page: PageIndex) -> Option<&[Annotation<'a>]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Pages with at least one annotation, ascending
    pub fn pages(&self) -> Vec<PageIndex> {
        self.pages.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageIndex, &[Annotation<'a>])> {
        self.pages.iter().map(|(page, list)| (*page, list.as_slice()))
    }

    /// Number of pages with annotations
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Pair every value with the operators registered for its box
///
/// Boxes missing from the spec are skipped. A box with several operators
/// contributes one annotation to each operator's page.
pub fn create_annotations<'a>(values: &'a ValueSet, spec: &'a Spec) -> PageAnnotations<'a> {
    let mut annotations = PageAnnotations::default();

    for (box_id, value) in values.iter() {
        let Some(operators) = spec.get(box_id) else {
            log::trace!("Box {box_id} is not in the spec, skipping");
            continue;
        };

        for operator in operators {
            annotations
                .pages
                .entry(operator.page())
                .or_default()
                .push(Annotation { operator, value });
        }
    }

    annotations
}
