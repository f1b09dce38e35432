use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EQUIPMENT_LEN: usize = 255;
pub const MAX_CATEGORY_LEN: usize = 50;

/// Difficulty scale shared by exercises and workouts.
///
/// The ordinal values 1/2/3 are part of the contract with the
/// recommendation consumers and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Medium,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Beginner, Difficulty::Medium, Difficulty::Expert];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Medium => "medium",
            Difficulty::Expert => "expert",
        }
    }

    #[must_use]
    pub fn numeric(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Medium => 2,
            Difficulty::Expert => 3,
        }
    }

    /// Parse one of the canonical names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "beginner" => Some(Difficulty::Beginner),
            "medium" => Some(Difficulty::Medium),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Parse a filter label. Accepts the legacy aliases and ordinal forms
    /// still sent by some API clients.
    #[must_use]
    pub fn from_filter_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "beginner" | "1" => Some(Difficulty::Beginner),
            "medium" | "intermediate" | "2" => Some(Difficulty::Medium),
            "expert" | "advanced" | "3" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse body-region taxonomy used for exercise targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Core,
    UpperBody,
    LowerBody,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 3] = [
        MuscleGroup::Core,
        MuscleGroup::UpperBody,
        MuscleGroup::LowerBody,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Core => "core",
            MuscleGroup::UpperBody => "upper_body",
            MuscleGroup::LowerBody => "lower_body",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "core" => Some(MuscleGroup::Core),
            "upper_body" => Some(MuscleGroup::UpperBody),
            "lower_body" => Some(MuscleGroup::LowerBody),
            _ => None,
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "exercise_id")]
    pub id: u64,
    #[serde(rename = "exercise_name")]
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "difficulty_level")]
    pub difficulty: Difficulty,
    pub target_muscle_group: MuscleGroup,
    pub default_duration_seconds: u32,
    pub default_rest_duration_seconds: u32,
    pub instructions: Option<String>,
    pub safety_tips: Option<String>,
    pub calories_burned_per_minute: Option<f64>,
    pub equipment_needed: Option<String>,
    #[serde(rename = "exercise_category")]
    pub category: Option<String>,
    pub demo_gif_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_duration() -> u32 {
    20
}

fn default_rest() -> u32 {
    10
}

/// Payload for creating an exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExercise {
    #[serde(rename = "exercise_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "difficulty_level")]
    pub difficulty: Difficulty,
    pub target_muscle_group: MuscleGroup,
    #[serde(default = "default_duration")]
    pub default_duration_seconds: u32,
    #[serde(default = "default_rest")]
    pub default_rest_duration_seconds: u32,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub safety_tips: Option<String>,
    #[serde(default)]
    pub calories_burned_per_minute: Option<f64>,
    #[serde(default)]
    pub equipment_needed: Option<String>,
    #[serde(rename = "exercise_category", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub demo_gif_url: Option<String>,
}

impl NewExercise {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("exercise_name must not be empty".into()));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(Error::InvalidInput(format!(
                "exercise_name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if self.default_duration_seconds == 0 {
            return Err(Error::InvalidInput(
                "default_duration_seconds must be at least 1".into(),
            ));
        }
        if self.default_rest_duration_seconds == 0 {
            return Err(Error::InvalidInput(
                "default_rest_duration_seconds must be at least 1".into(),
            ));
        }
        validate_calories(self.calories_burned_per_minute)?;
        validate_equipment(self.equipment_needed.as_deref())?;
        validate_category(self.category.as_deref())?;
        Ok(())
    }
}

/// Partial update for an exercise. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExercisePatch {
    #[serde(rename = "exercise_name")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "difficulty_level")]
    pub difficulty: Option<Difficulty>,
    pub target_muscle_group: Option<MuscleGroup>,
    pub default_duration_seconds: Option<u32>,
    pub default_rest_duration_seconds: Option<u32>,
    pub instructions: Option<String>,
    pub safety_tips: Option<String>,
    pub calories_burned_per_minute: Option<f64>,
    pub equipment_needed: Option<String>,
    #[serde(rename = "exercise_category")]
    pub category: Option<String>,
    pub demo_gif_url: Option<String>,
}

impl ExercisePatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidInput("exercise_name must not be empty".into()));
            }
            if name.len() > MAX_NAME_LEN {
                return Err(Error::InvalidInput(format!(
                    "exercise_name must be at most {MAX_NAME_LEN} characters"
                )));
            }
        }
        if self.default_duration_seconds == Some(0) {
            return Err(Error::InvalidInput(
                "default_duration_seconds must be at least 1".into(),
            ));
        }
        if self.default_rest_duration_seconds == Some(0) {
            return Err(Error::InvalidInput(
                "default_rest_duration_seconds must be at least 1".into(),
            ));
        }
        validate_calories(self.calories_burned_per_minute)?;
        validate_equipment(self.equipment_needed.as_deref())?;
        validate_category(self.category.as_deref())?;
        Ok(())
    }

    pub fn apply(&self, exercise: &mut Exercise) {
        if let Some(name) = &self.name {
            exercise.name = name.clone();
        }
        if let Some(description) = &self.description {
            exercise.description = Some(description.clone());
        }
        if let Some(difficulty) = self.difficulty {
            exercise.difficulty = difficulty;
        }
        if let Some(group) = self.target_muscle_group {
            exercise.target_muscle_group = group;
        }
        if let Some(duration) = self.default_duration_seconds {
            exercise.default_duration_seconds = duration;
        }
        if let Some(rest) = self.default_rest_duration_seconds {
            exercise.default_rest_duration_seconds = rest;
        }
        if let Some(instructions) = &self.instructions {
            exercise.instructions = Some(instructions.clone());
        }
        if let Some(tips) = &self.safety_tips {
            exercise.safety_tips = Some(tips.clone());
        }
        if let Some(calories) = self.calories_burned_per_minute {
            exercise.calories_burned_per_minute = Some(calories);
        }
        if let Some(equipment) = &self.equipment_needed {
            exercise.equipment_needed = Some(equipment.clone());
        }
        if let Some(category) = &self.category {
            exercise.category = Some(category.clone());
        }
        if let Some(url) = &self.demo_gif_url {
            exercise.demo_gif_url = Some(url.clone());
        }
    }
}

fn validate_calories(calories: Option<f64>) -> Result<()> {
    if let Some(value) = calories {
        if value.is_nan() || value < 0.0 {
            return Err(Error::InvalidInput(
                "calories_burned_per_minute must be a non-negative number".into(),
            ));
        }
    }
    Ok(())
}

fn validate_equipment(equipment: Option<&str>) -> Result<()> {
    if let Some(value) = equipment {
        if value.len() > MAX_EQUIPMENT_LEN {
            return Err(Error::InvalidInput(format!(
                "equipment_needed must be at most {MAX_EQUIPMENT_LEN} characters"
            )));
        }
    }
    Ok(())
}

fn validate_category(category: Option<&str>) -> Result<()> {
    if let Some(value) = category {
        if value.len() > MAX_CATEGORY_LEN {
            return Err(Error::InvalidInput(format!(
                "exercise_category must be at most {MAX_CATEGORY_LEN} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_exercise() -> NewExercise {
        NewExercise {
            name: "Push Up".to_string(),
            description: None,
            difficulty: Difficulty::Beginner,
            target_muscle_group: MuscleGroup::UpperBody,
            default_duration_seconds: 30,
            default_rest_duration_seconds: 10,
            instructions: None,
            safety_tips: None,
            calories_burned_per_minute: Some(7.5),
            equipment_needed: None,
            category: Some("strength".to_string()),
            demo_gif_url: None,
        }
    }

    #[test]
    fn test_difficulty_numeric_is_ordinal() {
        assert_eq!(Difficulty::Beginner.numeric(), 1);
        assert_eq!(Difficulty::Medium.numeric(), 2);
        assert_eq!(Difficulty::Expert.numeric(), 3);
        assert!(Difficulty::Beginner < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Expert);
    }

    #[test]
    fn test_difficulty_filter_labels() {
        assert_eq!(Difficulty::from_filter_label("beginner"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::from_filter_label("intermediate"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_filter_label("advanced"), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_filter_label("EXPERT"), Some(Difficulty::Expert));
        assert_eq!(Difficulty::from_filter_label("2"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_filter_label("legendary"), None);
    }

    #[test]
    fn test_difficulty_strict_names() {
        assert_eq!(Difficulty::from_name("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_name("intermediate"), None);
        assert_eq!(Difficulty::from_name("Medium"), None);
    }

    #[test]
    fn test_muscle_group_names() {
        for group in MuscleGroup::ALL {
            assert_eq!(MuscleGroup::from_name(group.as_str()), Some(group));
        }
        assert_eq!(MuscleGroup::from_name("legs"), None);
    }

    #[test]
    fn test_new_exercise_validation() {
        assert!(new_exercise().validate().is_ok());

        let mut invalid = new_exercise();
        invalid.name = "  ".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = new_exercise();
        invalid.default_duration_seconds = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = new_exercise();
        invalid.calories_burned_per_minute = Some(-1.0);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_patch_leaves_absent_fields_untouched() {
        let now = chrono::Utc::now();
        let mut exercise = Exercise {
            id: 1,
            name: "Push Up".to_string(),
            description: Some("Classic push up".to_string()),
            difficulty: Difficulty::Beginner,
            target_muscle_group: MuscleGroup::UpperBody,
            default_duration_seconds: 30,
            default_rest_duration_seconds: 10,
            instructions: None,
            safety_tips: None,
            calories_burned_per_minute: Some(7.5),
            equipment_needed: None,
            category: Some("strength".to_string()),
            demo_gif_url: None,
            created_at: now,
            updated_at: now,
        };

        let patch = ExercisePatch {
            difficulty: Some(Difficulty::Expert),
            ..ExercisePatch::default()
        };
        patch.apply(&mut exercise);

        assert_eq!(exercise.difficulty, Difficulty::Expert);
        assert_eq!(exercise.name, "Push Up");
        assert_eq!(exercise.description.as_deref(), Some("Classic push up"));
    }
}
