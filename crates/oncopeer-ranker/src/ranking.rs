//! Ranking a population by similarity to one query record.

use std::cmp::Ordering;

use tracing::debug;

use oncopeer_common::{PatientId, PatientRecord, Population, TieBreak};

use crate::scorer::similarity_score;

/// Identifier → similarity score, in population order.
pub type Similarities = Vec<(PatientId, f64)>;

/// A population member with its score against the query record.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPeer<'a> {
    pub id: &'a PatientId,
    pub record: &'a PatientRecord,
    pub score: f64,
}

/// Score every member of `population` against `record`.
/// A member identical to `record` is scored like any other.
pub fn patient_similarities(population: &Population, record: &PatientRecord) -> Similarities {
    population
        .iter()
        .map(|(id, patient)| (id.clone(), similarity_score(patient, record)))
        .collect()
}

/// Order identifiers by descending score.
pub fn rank_by_similarity(similarities: &[(PatientId, f64)], tie_break: TieBreak) -> Vec<PatientId> {
    let mut scored = similarities.to_vec();
    sort_descending(&mut scored, tie_break, |id| id.as_str());
    scored.into_iter().map(|(id, _)| id).collect()
}

/// Identifiers of `population` from most to least similar to `record`.
/// Tied patients come out in reverse population order.
pub fn patients_by_similarity(population: &Population, record: &PatientRecord) -> Vec<PatientId> {
    rank_by_similarity(&patient_similarities(population, record), TieBreak::StableReversed)
}

/// Population members from most to least similar to `record`, borrowed.
pub fn rank_peers<'a>(
    population: &'a Population,
    record: &PatientRecord,
    tie_break: TieBreak,
) -> Vec<RankedPeer<'a>> {
    let mut scored: Vec<((&'a PatientId, &'a PatientRecord), f64)> = population
        .iter()
        .map(|peer| (peer, similarity_score(peer.1, record)))
        .collect();
    sort_descending(&mut scored, tie_break, |(id, _)| id.as_str());

    if let Some(((id, _), score)) = scored.first() {
        debug!("Best of {} peers: {} ({:.2})", scored.len(), id, score);
    }

    scored
        .into_iter()
        .map(|((id, record), score)| RankedPeer { id, record, score })
        .collect()
}

fn by_score(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn sort_descending<T, F>(scored: &mut [(T, f64)], tie_break: TieBreak, id_of: F)
where
    F: Fn(&T) -> &str,
{
    match tie_break {
        TieBreak::StableReversed => {
            // Not the same as a stable descending sort: ties end up reversed
            scored.sort_by(|a, b| by_score(a.1, b.1));
            scored.reverse();
        }
        TieBreak::Identifier => {
            scored.sort_by(|a, b| by_score(b.1, a.1).then_with(|| id_of(&a.0).cmp(id_of(&b.0))));
        }
    }
}
