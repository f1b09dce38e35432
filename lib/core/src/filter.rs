// Query filters applied by the catalog store when listing and searching.
use serde::{Deserialize, Serialize};

use crate::exercise::{Difficulty, Exercise, MuscleGroup};
use crate::workout::{Workout, WorkoutType};

pub const DEFAULT_LIST_LIMIT: usize = 100;
pub const MAX_LIST_LIMIT: usize = 200;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 30;
pub const MAX_PAGE_SIZE: usize = 50;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter for the exercise list endpoint.
///
/// `difficulty` and `muscle_groups` carry the raw client labels: an
/// unrecognized difficulty leaves the filter inactive, while an unrecognized
/// muscle-group name matches no exercise.
#[derive(Debug, Clone, Default)]
pub struct ExerciseQuery {
    pub difficulty: Option<String>,
    pub muscle_groups: Vec<String>,
    pub limit: Option<usize>,
}

impl ExerciseQuery {
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        if let Some(label) = &self.difficulty {
            if let Some(difficulty) = Difficulty::from_filter_label(label) {
                if exercise.difficulty != difficulty {
                    return false;
                }
            }
        }
        if !self.muscle_groups.is_empty()
            && !self
                .muscle_groups
                .iter()
                .any(|group| group == exercise.target_muscle_group.as_str())
        {
            return false;
        }
        true
    }
}

/// Filter for the paginated exercise library.
#[derive(Debug, Clone, Default)]
pub struct LibraryQuery {
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub muscle_group: Option<MuscleGroup>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl LibraryQuery {
    #[must_use]
    pub fn effective_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn effective_per_page(&self) -> usize {
        self.per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        if let Some(term) = &self.search {
            let term = term.trim();
            if !term.is_empty() {
                let hit = contains_ci(&exercise.name, term)
                    || contains_ci(exercise.target_muscle_group.as_str(), term)
                    || exercise
                        .category
                        .as_deref()
                        .map(|category| contains_ci(category, term))
                        .unwrap_or(false);
                if !hit {
                    return false;
                }
            }
        }
        if let Some(difficulty) = self.difficulty {
            if exercise.difficulty != difficulty {
                return false;
            }
        }
        if let Some(group) = self.muscle_group {
            if exercise.target_muscle_group != group {
                return false;
            }
        }
        true
    }
}

/// Aggregate counts shown next to the library filter chips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub beginner: usize,
    pub medium: usize,
    pub expert: usize,
    pub core: usize,
    pub upper_body: usize,
    pub lower_body: usize,
}

impl LibraryStats {
    #[must_use]
    pub fn collect<'a>(exercises: impl Iterator<Item = &'a Exercise>) -> Self {
        let mut stats = LibraryStats::default();
        for exercise in exercises {
            stats.total += 1;
            match exercise.difficulty {
                Difficulty::Beginner => stats.beginner += 1,
                Difficulty::Medium => stats.medium += 1,
                Difficulty::Expert => stats.expert += 1,
            }
            match exercise.target_muscle_group {
                MuscleGroup::Core => stats.core += 1,
                MuscleGroup::UpperBody => stats.upper_body += 1,
                MuscleGroup::LowerBody => stats.lower_body += 1,
            }
        }
        stats
    }
}

/// Criteria for the workout search endpoint. Applied to public workouts only.
#[derive(Debug, Clone, Default)]
pub struct WorkoutQuery {
    pub difficulty: Option<Difficulty>,
    pub muscle_groups: Vec<MuscleGroup>,
    pub workout_type: Option<WorkoutType>,
    pub duration_min: Option<u32>,
    pub duration_max: Option<u32>,
    pub search_term: Option<String>,
}

impl WorkoutQuery {
    #[must_use]
    pub fn matches(&self, workout: &Workout) -> bool {
        if let Some(difficulty) = self.difficulty {
            if workout.difficulty != difficulty {
                return false;
            }
        }
        if !self
            .muscle_groups
            .iter()
            .all(|group| workout.target_muscle_groups.contains(group))
        {
            return false;
        }
        if let Some(workout_type) = self.workout_type {
            if workout.workout_type != workout_type {
                return false;
            }
        }
        if let Some(min) = self.duration_min {
            match workout.total_duration_minutes {
                Some(minutes) if minutes >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.duration_max {
            match workout.total_duration_minutes {
                Some(minutes) if minutes <= max => {}
                _ => return false,
            }
        }
        if let Some(term) = &self.search_term {
            let term = term.trim();
            if !term.is_empty() {
                let hit = contains_ci(&workout.name, term)
                    || workout
                        .description
                        .as_deref()
                        .map(|description| contains_ci(description, term))
                        .unwrap_or(false);
                if !hit {
                    return false;
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Exercises,
    Workouts,
    #[default]
    Both,
}

impl ContentKind {
    #[must_use]
    pub fn includes_exercises(self) -> bool {
        matches!(self, ContentKind::Exercises | ContentKind::Both)
    }

    #[must_use]
    pub fn includes_workouts(self) -> bool {
        matches!(self, ContentKind::Workouts | ContentKind::Both)
    }
}

/// Combined search over exercises and workouts.
#[derive(Debug, Clone)]
pub struct ContentQuery {
    pub term: String,
    pub kind: ContentKind,
    pub difficulty: Option<Difficulty>,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<String>,
    pub limit: Option<usize>,
}

impl ContentQuery {
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
    }

    #[must_use]
    pub fn matches_exercise(&self, exercise: &Exercise) -> bool {
        let hit = contains_ci(&exercise.name, &self.term)
            || exercise
                .description
                .as_deref()
                .map(|description| contains_ci(description, &self.term))
                .unwrap_or(false)
            || exercise
                .category
                .as_deref()
                .map(|category| contains_ci(category, &self.term))
                .unwrap_or(false)
            || exercise
                .equipment_needed
                .as_deref()
                .map(|equipment| contains_ci(equipment, &self.term))
                .unwrap_or(false);
        if !hit {
            return false;
        }
        if let Some(difficulty) = self.difficulty {
            if exercise.difficulty != difficulty {
                return false;
            }
        }
        if let Some(group) = self.muscle_group {
            if exercise.target_muscle_group != group {
                return false;
            }
        }
        if let Some(equipment) = &self.equipment {
            let matched = exercise
                .equipment_needed
                .as_deref()
                .map(|value| contains_ci(value, equipment))
                .unwrap_or(false);
            if !matched {
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn matches_workout(&self, workout: &Workout) -> bool {
        if !workout.is_public {
            return false;
        }
        let hit = contains_ci(&workout.name, &self.term)
            || workout
                .description
                .as_deref()
                .map(|description| contains_ci(description, &self.term))
                .unwrap_or(false);
        if !hit {
            return false;
        }
        if let Some(difficulty) = self.difficulty {
            if workout.difficulty != difficulty {
                return false;
            }
        }
        if let Some(group) = self.muscle_group {
            if !workout.target_muscle_groups.contains(&group) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn exercise(name: &str, difficulty: Difficulty, group: MuscleGroup) -> Exercise {
        let now = Utc::now();
        Exercise {
            id: 1,
            name: name.to_string(),
            description: Some("A bodyweight staple".to_string()),
            difficulty,
            target_muscle_group: group,
            default_duration_seconds: 30,
            default_rest_duration_seconds: 10,
            instructions: None,
            safety_tips: None,
            calories_burned_per_minute: Some(6.0),
            equipment_needed: Some("none".to_string()),
            category: Some("strength".to_string()),
            demo_gif_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn workout(name: &str, public: bool) -> Workout {
        let now = Utc::now();
        Workout {
            id: 1,
            name: name.to_string(),
            description: Some("Quick session".to_string()),
            total_duration_minutes: Some(20),
            difficulty: Difficulty::Medium,
            target_muscle_groups: vec![MuscleGroup::Core, MuscleGroup::UpperBody],
            workout_type: WorkoutType::Both,
            created_by: None,
            is_public: public,
            is_system_generated: true,
            total_exercises: 4,
            estimated_calories_burned: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_exercise_query_difficulty_aliases() {
        let query = ExerciseQuery {
            difficulty: Some("advanced".to_string()),
            ..ExerciseQuery::default()
        };
        assert!(query.matches(&exercise("Pistol Squat", Difficulty::Expert, MuscleGroup::LowerBody)));
        assert!(!query.matches(&exercise("Squat", Difficulty::Beginner, MuscleGroup::LowerBody)));
    }

    #[test]
    fn test_exercise_query_unknown_difficulty_is_inactive() {
        let query = ExerciseQuery {
            difficulty: Some("legendary".to_string()),
            ..ExerciseQuery::default()
        };
        assert!(query.matches(&exercise("Squat", Difficulty::Beginner, MuscleGroup::LowerBody)));
    }

    #[test]
    fn test_exercise_query_unknown_muscle_group_matches_nothing() {
        let query = ExerciseQuery {
            muscle_groups: vec!["legs".to_string()],
            ..ExerciseQuery::default()
        };
        assert!(!query.matches(&exercise("Squat", Difficulty::Beginner, MuscleGroup::LowerBody)));
    }

    #[test]
    fn test_exercise_query_limit_is_capped() {
        let query = ExerciseQuery {
            limit: Some(1000),
            ..ExerciseQuery::default()
        };
        assert_eq!(query.effective_limit(), MAX_LIST_LIMIT);
        assert_eq!(ExerciseQuery::default().effective_limit(), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_library_query_search_is_case_insensitive() {
        let query = LibraryQuery {
            search: Some("PUSH".to_string()),
            ..LibraryQuery::default()
        };
        assert!(query.matches(&exercise("Push Up", Difficulty::Beginner, MuscleGroup::UpperBody)));
        assert!(!query.matches(&exercise("Squat", Difficulty::Beginner, MuscleGroup::LowerBody)));
    }

    #[test]
    fn test_library_stats() {
        let exercises = vec![
            exercise("Push Up", Difficulty::Beginner, MuscleGroup::UpperBody),
            exercise("Plank", Difficulty::Beginner, MuscleGroup::Core),
            exercise("Pistol Squat", Difficulty::Expert, MuscleGroup::LowerBody),
        ];
        let stats = LibraryStats::collect(exercises.iter());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.beginner, 2);
        assert_eq!(stats.expert, 1);
        assert_eq!(stats.core, 1);
        assert_eq!(stats.upper_body, 1);
        assert_eq!(stats.lower_body, 1);
    }

    #[test]
    fn test_workout_query_requires_all_muscle_groups() {
        let query = WorkoutQuery {
            muscle_groups: vec![MuscleGroup::Core, MuscleGroup::UpperBody],
            ..WorkoutQuery::default()
        };
        assert!(query.matches(&workout("Full Body Blast", true)));

        let query = WorkoutQuery {
            muscle_groups: vec![MuscleGroup::LowerBody],
            ..WorkoutQuery::default()
        };
        assert!(!query.matches(&workout("Full Body Blast", true)));
    }

    #[test]
    fn test_workout_query_duration_bounds_require_known_duration() {
        let mut session = workout("Timed", true);
        session.total_duration_minutes = None;
        let query = WorkoutQuery {
            duration_min: Some(10),
            ..WorkoutQuery::default()
        };
        assert!(!query.matches(&session));
    }

    #[test]
    fn test_content_query_matches_equipment_text() {
        let query = ContentQuery {
            term: "none".to_string(),
            kind: ContentKind::Both,
            difficulty: None,
            muscle_group: None,
            equipment: None,
            limit: None,
        };
        assert!(query.matches_exercise(&exercise("Squat", Difficulty::Beginner, MuscleGroup::LowerBody)));
    }

    #[test]
    fn test_content_query_skips_private_workouts() {
        let query = ContentQuery {
            term: "session".to_string(),
            kind: ContentKind::Both,
            difficulty: None,
            muscle_group: None,
            equipment: None,
            limit: None,
        };
        assert!(query.matches_workout(&workout("Session", true)));
        assert!(!query.matches_workout(&workout("Session", false)));
    }
}
