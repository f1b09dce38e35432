use serde::{Deserialize, Serialize};

/// Taxonomy row describing a muscle group.
///
/// Exercises reference these rows through [`MuscleGroupLink`]; the link names
/// feed the feature pipeline, so seeded rows use the canonical group names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupRecord {
    #[serde(rename = "muscle_group_id")]
    pub id: u64,
    #[serde(rename = "group_name")]
    pub name: String,
    pub description: Option<String>,
    pub primary_muscles: Option<String>,
    pub secondary_muscles: Option<String>,
    pub exercise_benefits: Option<String>,
}

/// Association between an exercise and a muscle-group taxonomy row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupLink {
    pub muscle_group_id: u64,
    pub primary_target: bool,
    pub activation_percentage: Option<f64>,
}
