use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exercise::{Difficulty, MuscleGroup, MAX_NAME_LEN};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Individual,
    Group,
    #[default]
    Both,
}

impl WorkoutType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Individual => "individual",
            WorkoutType::Group => "group",
            WorkoutType::Both => "both",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "individual" => Some(WorkoutType::Individual),
            "group" => Some(WorkoutType::Group),
            "both" => Some(WorkoutType::Both),
            _ => None,
        }
    }
}

/// A curated or user-created workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(rename = "workout_id")]
    pub id: u64,
    #[serde(rename = "workout_name")]
    pub name: String,
    pub description: Option<String>,
    pub total_duration_minutes: Option<u32>,
    #[serde(rename = "difficulty_level")]
    pub difficulty: Difficulty,
    pub target_muscle_groups: Vec<MuscleGroup>,
    pub workout_type: WorkoutType,
    pub created_by: Option<u64>,
    pub is_public: bool,
    pub is_system_generated: bool,
    pub total_exercises: u32,
    pub estimated_calories_burned: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered link between a workout and one of its exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub workout_id: u64,
    pub exercise_id: u64,
    pub order_sequence: u32,
    pub custom_duration_seconds: Option<u32>,
    pub custom_rest_duration_seconds: Option<u32>,
    pub sets_count: Option<u32>,
}

fn default_true() -> bool {
    true
}

/// Payload for creating a workout together with its exercise sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkout {
    #[serde(rename = "workout_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "difficulty_level")]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub target_muscle_groups: Vec<MuscleGroup>,
    #[serde(default)]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub total_duration_minutes: Option<u32>,
    #[serde(default)]
    pub created_by: Option<u64>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_system_generated: bool,
    #[serde(default)]
    pub estimated_calories_burned: Option<f64>,
    pub exercises: Vec<NewWorkoutExercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkoutExercise {
    pub exercise_id: u64,
    pub order_sequence: u32,
    #[serde(default)]
    pub custom_duration_seconds: Option<u32>,
    #[serde(default)]
    pub custom_rest_duration_seconds: Option<u32>,
    #[serde(default)]
    pub sets_count: Option<u32>,
}

impl NewWorkout {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("workout_name must not be empty".into()));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(Error::InvalidInput(format!(
                "workout_name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if self.exercises.is_empty() {
            return Err(Error::InvalidInput(
                "a workout requires at least one exercise".into(),
            ));
        }
        for exercise in &self.exercises {
            if exercise.order_sequence == 0 {
                return Err(Error::InvalidInput(
                    "order_sequence must be at least 1".into(),
                ));
            }
            if exercise.custom_duration_seconds == Some(0)
                || exercise.custom_rest_duration_seconds == Some(0)
                || exercise.sets_count == Some(0)
            {
                return Err(Error::InvalidInput(
                    "custom durations and sets_count must be at least 1".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_workout() -> NewWorkout {
        NewWorkout {
            name: "Morning Core".to_string(),
            description: None,
            difficulty: Difficulty::Beginner,
            target_muscle_groups: vec![MuscleGroup::Core],
            workout_type: WorkoutType::Both,
            total_duration_minutes: Some(15),
            created_by: None,
            is_public: true,
            is_system_generated: false,
            estimated_calories_burned: None,
            exercises: vec![NewWorkoutExercise {
                exercise_id: 1,
                order_sequence: 1,
                custom_duration_seconds: None,
                custom_rest_duration_seconds: None,
                sets_count: Some(3),
            }],
        }
    }

    #[test]
    fn test_new_workout_validation() {
        assert!(new_workout().validate().is_ok());

        let mut invalid = new_workout();
        invalid.exercises.clear();
        assert!(invalid.validate().is_err());

        let mut invalid = new_workout();
        invalid.exercises[0].order_sequence = 0;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_workout_type_names() {
        for workout_type in [WorkoutType::Individual, WorkoutType::Group, WorkoutType::Both] {
            assert_eq!(WorkoutType::from_name(workout_type.as_str()), Some(workout_type));
        }
        assert_eq!(WorkoutType::from_name("solo"), None);
        assert_eq!(WorkoutType::default(), WorkoutType::Both);
    }
}
