//! Pairwise patient similarity.
//!
//! Every attribute contributes a value in [0.0, 1.0]:
//!
//! | Values | Contribution |
//! |--------|--------------|
//! | either missing | 0.5 |
//! | both numeric | 1 / (\|v1 − v2\| + 1) |
//! | equal text | 1.0 |
//! | otherwise | 0.0 |
//!
//! The summed score is rounded once to two decimals.

use oncopeer_common::{Attribute, FieldValue, PatientRecord};

/// Contribution of an attribute where either side is missing.
pub const MISSING_CONTRIBUTION: f64 = 0.5;

/// Similarity contribution of a single attribute pair.
pub fn attribute_similarity(a: &FieldValue, b: &FieldValue) -> f64 {
    match (a, b) {
        (FieldValue::Missing, _) | (_, FieldValue::Missing) => MISSING_CONTRIBUTION,
        (FieldValue::Numeric { value: x, .. }, FieldValue::Numeric { value: y, .. }) => {
            1.0 / ((x - y).abs() + 1.0)
        }
        _ if a.as_str() == b.as_str() => 1.0,
        _ => 0.0,
    }
}

/// Per-attribute contributions in canonical attribute order.
pub fn attribute_contributions<'a>(
    a: &'a PatientRecord,
    b: &'a PatientRecord,
) -> impl Iterator<Item = (Attribute, f64)> + 'a {
    Attribute::ALL
        .iter()
        .map(move |&attribute| (attribute, attribute_similarity(a.get(attribute), b.get(attribute))))
}

/// Similarity score between two records, in [0, 8].
pub fn similarity_score(a: &PatientRecord, b: &PatientRecord) -> f64 {
    let total = attribute_contributions(a, b).fold(0.0, |acc, (_, c)| acc + c);
    round_hundredths(total)
}

/// Round to two decimals on the exact binary value, ties to even.
/// Scaling by 100 first would round twice and can invent a tie.
pub fn round_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
