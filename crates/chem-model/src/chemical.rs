//! The normalized `Chemical` entity handed to the registry collection.
//!
//! Derived fields are typed struct members; direct-mapped attributes live in
//! an ordered map keyed by their registry property name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of a direct-mapped attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// A normalized chemical ready for the collection sink.
///
/// `code` is only assigned when the organizational unit is known; two rows
/// sharing organizational unit and handling identifier produce the same code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chemical {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Canonical zero-padded handling identifier.
    pub handling_id: String,
    pub attributes: BTreeMap<String, FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bam_oe: Option<String>,
    pub hazardous_substance: bool,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bam_location_complete: Option<String>,
}

impl Chemical {
    pub fn attribute(&self, field: &str) -> Option<&FieldValue> {
        self.attributes.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.attribute(field).and_then(FieldValue::as_text)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.attribute(field).and_then(FieldValue::as_number)
    }
}

/// Append-only destination for completed entities.
///
/// The batch offers entities in input order and never touches them again.
pub trait ChemicalSink {
    fn add(&mut self, chemical: Chemical);
}

impl ChemicalSink for Vec<Chemical> {
    fn add(&mut self, chemical: Chemical) {
        self.push(chemical);
    }
}
