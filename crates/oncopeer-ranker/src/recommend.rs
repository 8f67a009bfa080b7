//! Treatment recommendation from the most similar reference patient.
//!
//! A target without a treatment receives the treatment of the top-ranked
//! reference patient. Targets are never modified in place: plans are made on
//! a new population snapshot.

use tracing::{debug, info, warn};

use oncopeer_common::{
    FieldValue, OncopeerConfig, OncopeerError, PatientId, PatientRecord, Population, RankingConfig, Result,
    TieBreak,
};

use crate::ranking::{rank_peers, RankedPeer};

/// Recommendation engine configured with a ranking tie-break policy.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    tie_break: TieBreak,
}

impl Recommender {
    pub fn new(config: &RankingConfig) -> Self {
        Self { tie_break: config.tie_break }
    }

    pub fn from_config(config: &OncopeerConfig) -> Self {
        Self::new(&config.ranking)
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Reference patients from most to least similar to `record`.
    pub fn rank<'a>(&self, reference: &'a Population, record: &PatientRecord) -> Vec<RankedPeer<'a>> {
        rank_peers(reference, record, self.tie_break)
    }

    /// Treatments of the reference population in ranked order.
    pub fn recommendations(&self, reference: &Population, record: &PatientRecord) -> Vec<FieldValue> {
        self.rank(reference, record)
            .into_iter()
            .map(|peer| peer.record.treatment.clone())
            .collect()
    }

    /// Treatment of the single most similar reference patient.
    pub fn recommend(&self, reference: &Population, record: &PatientRecord) -> Result<FieldValue> {
        let ranked = self.rank(reference, record);
        let best = ranked.first().ok_or(OncopeerError::EmptyPopulation)?;

        if best.record.treatment.is_missing() {
            warn!("Best peer {} has no treatment; recommendation stays missing", best.id);
        }
        debug!(
            "Recommending {} from peer {} (score {:.2})",
            best.record.treatment, best.id, best.score
        );
        Ok(best.record.treatment.clone())
    }

    /// New snapshot of `targets` in which every record lacking a treatment
    /// carries the recommendation for it. Records with a treatment are
    /// copied unchanged, so running this twice is the same as running it once.
    pub fn make_plans(&self, reference: &Population, targets: &Population) -> Result<Population> {
        let pending = targets.iter().filter(|(_, r)| r.needs_treatment()).count();
        if pending > 0 && reference.is_empty() {
            return Err(OncopeerError::EmptyPopulation);
        }

        let plans = targets
            .iter()
            .map(|(id, record)| -> Result<(PatientId, PatientRecord)> {
                let record = if record.needs_treatment() {
                    record.with_treatment(self.recommend(reference, record)?)
                } else {
                    record.clone()
                };
                Ok((id.clone(), record))
            })
            .collect::<Result<Population>>()?;

        info!(
            "Made {} treatment plans for {} patients against {} reference patients",
            pending,
            targets.len(),
            reference.len()
        );
        Ok(plans)
    }
}

/// Treatments of `reference` ranked by similarity to `record`.
pub fn treatment_recommendations(reference: &Population, record: &PatientRecord) -> Vec<FieldValue> {
    Recommender::default().recommendations(reference, record)
}

/// Treatment of the reference patient most similar to `record`.
pub fn recommend_treatment(reference: &Population, record: &PatientRecord) -> Result<FieldValue> {
    Recommender::default().recommend(reference, record)
}

/// Fill every missing treatment in `targets` from its most similar reference patient.
pub fn make_treatment_plans(reference: &Population, targets: &Population) -> Result<Population> {
    Recommender::default().make_plans(reference, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncopeer_test_utils::fixtures::{self, record};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recommend_new_patient() {
        let treatment = recommend_treatment(&fixtures::three_patients(), &fixtures::new_patient_info()).unwrap();
        assert_eq!(treatment, FieldValue::from("plan_1"));
    }

    #[test]
    fn test_treatment_recommendations_in_ranked_order() {
        let treatments = treatment_recommendations(&fixtures::three_patients(), &fixtures::new_patient_info());
        let labels: Vec<&str> = treatments.iter().map(|t| t.as_str()).collect();
        assert_eq!(labels, vec!["plan_1", "plan_4", "plan_2"]);
    }

    #[test]
    fn test_make_treatment_plans() {
        let plans = make_treatment_plans(&fixtures::three_patients(), &fixtures::new_patients()).unwrap();
        assert_eq!(plans, fixtures::new_patients_recommendations());
    }

    #[test]
    fn test_targets_not_mutated() {
        let targets = fixtures::new_patients();
        let _ = make_treatment_plans(&fixtures::three_patients(), &targets).unwrap();
        assert_eq!(targets, fixtures::new_patients());
    }

    #[test]
    fn test_plans_are_idempotent() {
        let reference = fixtures::three_patients();
        let once = make_treatment_plans(&reference, &fixtures::new_patients()).unwrap();
        let twice = make_treatment_plans(&reference, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_treatment_kept() {
        let mut targets = Population::new();
        targets.insert("p1", record(["50", "female", "t2", "n0", "m0", "h_t_1", "5", "plan_9"]));
        let plans = make_treatment_plans(&fixtures::three_patients(), &targets).unwrap();
        assert_eq!(plans.get("p1").unwrap().treatment.as_str(), "plan_9");
    }

    #[test]
    fn test_empty_reference() {
        let err = recommend_treatment(&Population::new(), &fixtures::new_patient_info()).unwrap_err();
        assert!(matches!(err, OncopeerError::EmptyPopulation));

        let err = make_treatment_plans(&Population::new(), &fixtures::new_patients()).unwrap_err();
        assert!(matches!(err, OncopeerError::EmptyPopulation));

        // Nothing to recommend, nothing to fail on
        let plans = make_treatment_plans(&Population::new(), &fixtures::three_patients()).unwrap();
        assert_eq!(plans, fixtures::three_patients());
    }

    #[test]
    fn test_missing_peer_treatment_propagates() {
        let mut reference = Population::new();
        reference.insert("untreated", fixtures::new_patient_info());
        let treatment = recommend_treatment(&reference, &fixtures::new_patient_info()).unwrap();
        assert!(treatment.is_missing());
    }

    #[test]
    fn test_closer_age_wins_after_rounding() {
        let mut reference = Population::new();
        reference.insert("a", record(["40", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_a"]));
        reference.insert("b", record(["39", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_b"]));
        let query = record(["79", "female", "t2", "n0", "m0", "h_t_1", "0", "NA"]);

        let peers = Recommender::default().rank(&reference, &query);
        let ranked: Vec<&str> = peers.iter().map(|peer| peer.id.as_str()).collect();
        assert_eq!(ranked, vec!["a", "b"]);
        assert_eq!(recommend_treatment(&reference, &query).unwrap().as_str(), "plan_a");
    }

    #[test]
    fn test_identifier_tie_break_changes_pick() {
        let mut reference = Population::new();
        reference.insert("z", record(["42", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_z"]));
        reference.insert("a", record(["42", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_a"]));
        let query = record(["42", "female", "t2", "n0", "m0", "h_t_1", "0", "NA"]);

        assert_eq!(recommend_treatment(&reference, &query).unwrap().as_str(), "plan_a");

        let mut reference = Population::new();
        reference.insert("a", record(["42", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_a"]));
        reference.insert("z", record(["42", "female", "t2", "n0", "m0", "h_t_1", "0", "plan_z"]));
        assert_eq!(recommend_treatment(&reference, &query).unwrap().as_str(), "plan_z");

        let by_id = Recommender::new(&RankingConfig { tie_break: TieBreak::Identifier });
        assert_eq!(by_id.tie_break(), TieBreak::Identifier);
        assert_eq!(by_id.recommend(&reference, &query).unwrap().as_str(), "plan_a");
    }
}
