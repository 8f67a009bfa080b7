//! Grouping patients by attribute value.

use std::collections::HashMap;

use oncopeer_common::{Attribute, PatientId, Population, Result};

/// Attribute value (wire form, missing as `NA`) → identifiers holding it.
pub type ValueToIds = HashMap<String, Vec<PatientId>>;

/// Group a population by the value of one attribute.
/// Identifiers within a group follow population order.
pub fn build_value_to_ids(population: &Population, attribute: Attribute) -> ValueToIds {
    let mut groups = ValueToIds::new();
    for (id, record) in population.iter() {
        groups
            .entry(record.get(attribute).as_str().to_string())
            .or_default()
            .push(id.clone());
    }
    groups
}

/// Same as [`build_value_to_ids`], addressing the attribute by column name.
pub fn build_value_to_ids_by_name(population: &Population, name: &str) -> Result<ValueToIds> {
    let attribute: Attribute = name.parse()?;
    Ok(build_value_to_ids(population, attribute))
}

/// Identifiers whose value for `attribute` is missing.
pub fn patients_with_missing_values(population: &Population, attribute: Attribute) -> Vec<PatientId> {
    population
        .iter()
        .filter(|(_, record)| record.get(attribute).is_missing())
        .map(|(id, _)| id.clone())
        .collect()
}
