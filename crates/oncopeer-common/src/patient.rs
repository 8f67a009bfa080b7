//! Core patient types shared by ingestion and ranking.
//! A dataset row becomes a strongly-typed `PatientRecord`; the `NA` token
//! only exists at the wire boundary.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OncopeerError, Result};

/// The "Not Available" token used by the tab-separated wire format.
pub const NA: &str = "NA";

/// Patient identifiers are opaque strings such as `tcga.5l.aat0`.
pub type PatientId = String;

// ---------------------------------------------------------------------------
// Attribute
// ---------------------------------------------------------------------------

/// The clinical attributes every record carries, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Gender")]
    Gender,
    #[serde(rename = "Tumor_Size")]
    TumorSize,
    #[serde(rename = "Nearby_Cancer_Lymphnodes")]
    NearbyCancerLymphnodes,
    #[serde(rename = "Cancer_Spread")]
    CancerSpread,
    #[serde(rename = "Histological_Type")]
    HistologicalType,
    #[serde(rename = "Lymph_Nodes")]
    LymphNodes,
    #[serde(rename = "Treatment")]
    Treatment,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Age,
        Attribute::Gender,
        Attribute::TumorSize,
        Attribute::NearbyCancerLymphnodes,
        Attribute::CancerSpread,
        Attribute::HistologicalType,
        Attribute::LymphNodes,
        Attribute::Treatment,
    ];

    /// Column name used in dataset headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Age                    => "Age",
            Attribute::Gender                 => "Gender",
            Attribute::TumorSize              => "Tumor_Size",
            Attribute::NearbyCancerLymphnodes => "Nearby_Cancer_Lymphnodes",
            Attribute::CancerSpread           => "Cancer_Spread",
            Attribute::HistologicalType       => "Histological_Type",
            Attribute::LymphNodes             => "Lymph_Nodes",
            Attribute::Treatment              => "Treatment",
        }
    }
}

impl FromStr for Attribute {
    type Err = OncopeerError;

    fn from_str(s: &str) -> Result<Self> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| OncopeerError::MissingKey(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field value
// ---------------------------------------------------------------------------

/// A single attribute value, classified once when the record is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FieldValue {
    /// Text made only of ASCII digits, e.g. an age or a lymph node count.
    Numeric { raw: String, value: f64 },
    Categorical(String),
    Missing,
}

impl FieldValue {
    /// Classify a raw wire value, treating `missing_token` as absent.
    pub fn classify(raw: &str, missing_token: &str) -> Self {
        if raw == missing_token {
            return FieldValue::Missing;
        }
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = raw.parse::<f64>() {
                return FieldValue::Numeric { raw: raw.to_string(), value };
            }
        }
        FieldValue::Categorical(raw.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Wire rendering; missing values render as `NA`.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Numeric { raw, .. } => raw,
            FieldValue::Categorical(s) => s,
            FieldValue::Missing => NA,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(raw: &str) -> Self {
        FieldValue::classify(raw, NA)
    }
}

impl From<String> for FieldValue {
    fn from(raw: String) -> Self {
        FieldValue::classify(&raw, NA)
    }
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Patient record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Age")]
    pub age: FieldValue,
    #[serde(rename = "Gender")]
    pub gender: FieldValue,
    #[serde(rename = "Tumor_Size")]
    pub tumor_size: FieldValue,
    #[serde(rename = "Nearby_Cancer_Lymphnodes")]
    pub nearby_cancer_lymphnodes: FieldValue,
    #[serde(rename = "Cancer_Spread")]
    pub cancer_spread: FieldValue,
    #[serde(rename = "Histological_Type")]
    pub histological_type: FieldValue,
    #[serde(rename = "Lymph_Nodes")]
    pub lymph_nodes: FieldValue,
    #[serde(rename = "Treatment")]
    pub treatment: FieldValue,
}

impl PatientRecord {
    /// Build a record by producing each attribute's value in canonical order.
    pub fn from_fn<F>(mut value_of: F) -> Self
    where
        F: FnMut(Attribute) -> FieldValue,
    {
        Self {
            age: value_of(Attribute::Age),
            gender: value_of(Attribute::Gender),
            tumor_size: value_of(Attribute::TumorSize),
            nearby_cancer_lymphnodes: value_of(Attribute::NearbyCancerLymphnodes),
            cancer_spread: value_of(Attribute::CancerSpread),
            histological_type: value_of(Attribute::HistologicalType),
            lymph_nodes: value_of(Attribute::LymphNodes),
            treatment: value_of(Attribute::Treatment),
        }
    }

    pub fn get(&self, attribute: Attribute) -> &FieldValue {
        match attribute {
            Attribute::Age                    => &self.age,
            Attribute::Gender                 => &self.gender,
            Attribute::TumorSize              => &self.tumor_size,
            Attribute::NearbyCancerLymphnodes => &self.nearby_cancer_lymphnodes,
            Attribute::CancerSpread           => &self.cancer_spread,
            Attribute::HistologicalType       => &self.histological_type,
            Attribute::LymphNodes             => &self.lymph_nodes,
            Attribute::Treatment              => &self.treatment,
        }
    }

    /// Values in canonical attribute order.
    pub fn values(&self) -> impl Iterator<Item = (Attribute, &FieldValue)> + '_ {
        Attribute::ALL.iter().map(move |&a| (a, self.get(a)))
    }

    /// Does this record still need a treatment plan?
    pub fn needs_treatment(&self) -> bool {
        self.treatment.is_missing()
    }

    /// Copy of this record carrying the given treatment.
    pub fn with_treatment(&self, treatment: FieldValue) -> Self {
        Self { treatment, ..self.clone() }
    }
}

// ---------------------------------------------------------------------------
// Population
// ---------------------------------------------------------------------------

/// Patients keyed by identifier, kept in insertion order.
/// Ranking ties depend on this order, so it is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    patients: Vec<(PatientId, PatientRecord)>,
    /// Identifier → position in `patients`.
    positions: HashMap<PatientId, usize>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a patient. An existing identifier keeps its position and has
    /// its record replaced.
    pub fn insert(&mut self, id: impl Into<PatientId>, record: PatientRecord) {
        let id = id.into();
        match self.positions.get(&id) {
            Some(&position) => {
                debug!("Replacing record for duplicate patient id {}", id);
                self.patients[position].1 = record;
            }
            None => {
                self.positions.insert(id.clone(), self.patients.len());
                self.patients.push((id, record));
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.positions
            .get(id)
            .and_then(|&position| self.patients.get(position))
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PatientId, &PatientRecord)> + '_ {
        self.patients.iter().map(|(id, record)| (id, record))
    }

    pub fn ids(&self) -> impl Iterator<Item = &PatientId> + '_ {
        self.patients.iter().map(|(id, _)| id)
    }
}

impl FromIterator<(PatientId, PatientRecord)> for Population {
    fn from_iter<T: IntoIterator<Item = (PatientId, PatientRecord)>>(iter: T) -> Self {
        let mut population = Population::new();
        for (id, record) in iter {
            population.insert(id, record);
        }
        population
    }
}

impl IntoIterator for Population {
    type Item = (PatientId, PatientRecord);
    type IntoIter = std::vec::IntoIter<(PatientId, PatientRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.patients.into_iter()
    }
}
