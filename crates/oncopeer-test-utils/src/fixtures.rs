//! Small TCGA-style populations used across unit and end-to-end tests.
//!
//! Values are listed in canonical attribute order: Age, Gender, Tumor_Size,
//! Nearby_Cancer_Lymphnodes, Cancer_Spread, Histological_Type, Lymph_Nodes,
//! Treatment.

use oncopeer_common::{Attribute, FieldValue, PatientRecord, Population};

/// `three_patients()` in the tab-separated wire format.
pub const THREE_PATIENTS_TSV: &str = "\
Patient_ID\tAge\tGender\tTumor_Size\tNearby_Cancer_Lymphnodes\tCancer_Spread\tHistological_Type\tLymph_Nodes\tTreatment
tcga.5l.aat0\t42\tfemale\tt2\tn0\tm0\th_t_1\t0\tplan_1
tcga.aq.a54o\t51\tmale\tt2\tn0\tm0\th_t_2\t0\tplan_2
tcga.aq.a7u7\t55\tfemale\tt2\tn2a\tm0\th_t_1\t4\tplan_4
";

/// Build a record from raw wire values in canonical order.
pub fn record(values: [&str; 8]) -> PatientRecord {
    PatientRecord::from_fn(|attribute| FieldValue::from(values[attribute as usize]))
}

fn population(rows: &[(&str, [&str; 8])]) -> Population {
    rows.iter()
        .map(|(id, values)| (id.to_string(), record(*values)))
        .collect()
}

pub fn three_patients() -> Population {
    population(&[
        ("tcga.5l.aat0", ["42", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_1"]),
        ("tcga.aq.a54o", ["51", "male", "t2", "n0", "m0", "h_t_2", "0", "plan_2"]),
        ("tcga.aq.a7u7", ["55", "female", "t2", "n2a", "m0", "h_t_1", "4", "plan_4"]),
    ])
}

pub fn patients_with_na() -> Population {
    population(&[
        ("tcga.5l.aat0", ["42", "female", "t2", "n0", "m0", "NA", "0", "plan_1"]),
        ("tcga.aq.a54o", ["51", "male", "t2", "n0", "m0", "h_t_2", "0", "plan_2"]),
        ("tcga.aq.a7u7", ["55", "female", "t2", "n2a", "m0", "h_t_1", "NA", "NA"]),
    ])
}

pub fn new_patient_info() -> PatientRecord {
    record(["50", "female", "t2", "n0", "m0", "h_t_1", "5", "NA"])
}

pub fn new_patients() -> Population {
    population(&[
        ("tcga.uu.a93s", ["63", "female", "t4d", "n3b", "m1", "h_t_2", "NA", "NA"]),
        ("tcga.v7.a7hq", ["75", "female", "t1c", "n2a", "m0", "h_t_2", "5", "NA"]),
        ("tcga.xx.a899", ["46", "female", "t1c", "n2a", "mx", "h_t_1", "5", "NA"]),
    ])
}

/// `new_patients()` after plans are made against `three_patients()`.
pub fn new_patients_recommendations() -> Population {
    population(&[
        ("tcga.uu.a93s", ["63", "female", "t4d", "n3b", "m1", "h_t_2", "NA", "plan_4"]),
        ("tcga.v7.a7hq", ["75", "female", "t1c", "n2a", "m0", "h_t_2", "5", "plan_4"]),
        ("tcga.xx.a899", ["46", "female", "t1c", "n2a", "mx", "h_t_1", "5", "plan_4"]),
    ])
}

/// Render a population as a tab-separated dataset with a `Patient_ID` column.
pub fn to_tsv(population: &Population) -> String {
    let header: Vec<&str> = Attribute::ALL.iter().map(|a| a.as_str()).collect();
    let mut out = format!("Patient_ID\t{}\n", header.join("\t"));
    for (id, record) in population.iter() {
        let values: Vec<&str> = record.values().map(|(_, v)| v.as_str()).collect();
        out.push_str(&format!("{}\t{}\n", id, values.join("\t")));
    }
    out
}
