//! oncopeer-ranker — Patient similarity scoring, ranking, and treatment recommendation.

pub mod index;
pub mod scorer;
pub mod ranking;
pub mod recommend;

pub use index::{build_value_to_ids, build_value_to_ids_by_name, patients_with_missing_values, ValueToIds};
pub use scorer::similarity_score;
pub use ranking::{patient_similarities, patients_by_similarity, rank_by_similarity, rank_peers, RankedPeer, Similarities};
pub use recommend::{make_treatment_plans, recommend_treatment, treatment_recommendations, Recommender};
