//! Starter catalog content, loaded when the store comes up empty.

use std::collections::HashMap;

use fitcontent_core::{
    Difficulty, InstructionType, MuscleGroup, MuscleGroupRecord, NewExercise, NewInstruction,
    NewVideo, NewWorkout, NewWorkoutExercise, Result, VideoQuality, VideoType, WorkoutType,
};

use crate::catalog::CatalogStore;

pub const SEED_EXERCISE_COUNT: usize = 12;

struct SeedExercise {
    name: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    target: MuscleGroup,
    duration_seconds: u32,
    rest_seconds: u32,
    calories_per_minute: f64,
    equipment: &'static str,
    category: &'static str,
    safety_tips: Option<&'static str>,
    secondary_groups: &'static [MuscleGroup],
}

const SEED_EXERCISES: [SeedExercise; SEED_EXERCISE_COUNT] = [
    SeedExercise {
        name: "Push Up",
        description: "Classic horizontal press performed from a high plank.",
        difficulty: Difficulty::Beginner,
        target: MuscleGroup::UpperBody,
        duration_seconds: 30,
        rest_seconds: 15,
        calories_per_minute: 7.0,
        equipment: "none",
        category: "strength",
        safety_tips: Some("Keep the hips in line with the shoulders."),
        secondary_groups: &[MuscleGroup::Core],
    },
    SeedExercise {
        name: "Plank",
        description: "Isometric hold on forearms with a neutral spine.",
        difficulty: Difficulty::Beginner,
        target: MuscleGroup::Core,
        duration_seconds: 60,
        rest_seconds: 20,
        calories_per_minute: 5.0,
        equipment: "none",
        category: "strength",
        safety_tips: Some("Do not let the lower back sag."),
        secondary_groups: &[],
    },
    SeedExercise {
        name: "Crunches",
        description: "Short-range spinal flexion targeting the abdominals.",
        difficulty: Difficulty::Beginner,
        target: MuscleGroup::Core,
        duration_seconds: 45,
        rest_seconds: 15,
        calories_per_minute: 6.0,
        equipment: "none",
        category: "strength",
        safety_tips: None,
        secondary_groups: &[],
    },
    SeedExercise {
        name: "Bodyweight Squat",
        description: "Fundamental knee-dominant squat pattern.",
        difficulty: Difficulty::Beginner,
        target: MuscleGroup::LowerBody,
        duration_seconds: 40,
        rest_seconds: 20,
        calories_per_minute: 8.0,
        equipment: "none",
        category: "strength",
        safety_tips: Some("Track the knees over the toes."),
        secondary_groups: &[MuscleGroup::Core],
    },
    SeedExercise {
        name: "Walking Lunges",
        description: "Alternating forward lunges covering ground.",
        difficulty: Difficulty::Medium,
        target: MuscleGroup::LowerBody,
        duration_seconds: 40,
        rest_seconds: 20,
        calories_per_minute: 7.5,
        equipment: "none",
        category: "strength",
        safety_tips: None,
        secondary_groups: &[MuscleGroup::Core],
    },
    SeedExercise {
        name: "Mountain Climbers",
        description: "Dynamic plank with alternating knee drives.",
        difficulty: Difficulty::Medium,
        target: MuscleGroup::Core,
        duration_seconds: 30,
        rest_seconds: 15,
        calories_per_minute: 10.0,
        equipment: "none",
        category: "cardio",
        safety_tips: None,
        secondary_groups: &[MuscleGroup::LowerBody],
    },
    SeedExercise {
        name: "Burpees",
        description: "Squat thrust into a jump, repeated at pace.",
        difficulty: Difficulty::Expert,
        target: MuscleGroup::LowerBody,
        duration_seconds: 30,
        rest_seconds: 30,
        calories_per_minute: 12.5,
        equipment: "none",
        category: "cardio",
        safety_tips: Some("Land softly with bent knees."),
        secondary_groups: &[MuscleGroup::Core, MuscleGroup::UpperBody],
    },
    SeedExercise {
        name: "Dumbbell Shoulder Press",
        description: "Seated or standing overhead press with dumbbells.",
        difficulty: Difficulty::Medium,
        target: MuscleGroup::UpperBody,
        duration_seconds: 45,
        rest_seconds: 30,
        calories_per_minute: 6.5,
        equipment: "dumbbells",
        category: "strength",
        safety_tips: Some("Avoid arching the lower back under load."),
        secondary_groups: &[MuscleGroup::Core],
    },
    SeedExercise {
        name: "Band Row",
        description: "Horizontal pull against a resistance band.",
        difficulty: Difficulty::Medium,
        target: MuscleGroup::UpperBody,
        duration_seconds: 45,
        rest_seconds: 20,
        calories_per_minute: 6.0,
        equipment: "resistance bands",
        category: "strength",
        safety_tips: None,
        secondary_groups: &[],
    },
    SeedExercise {
        name: "Single-Leg Stand",
        description: "Static balance hold on one leg.",
        difficulty: Difficulty::Beginner,
        target: MuscleGroup::LowerBody,
        duration_seconds: 30,
        rest_seconds: 10,
        calories_per_minute: 3.0,
        equipment: "none",
        category: "balance",
        safety_tips: None,
        secondary_groups: &[MuscleGroup::Core],
    },
    SeedExercise {
        name: "Standing Hamstring Stretch",
        description: "Forward fold lengthening the posterior chain.",
        difficulty: Difficulty::Beginner,
        target: MuscleGroup::LowerBody,
        duration_seconds: 45,
        rest_seconds: 10,
        calories_per_minute: 2.5,
        equipment: "none",
        category: "flexibility",
        safety_tips: Some("Hinge at the hips rather than rounding the spine."),
        secondary_groups: &[],
    },
    SeedExercise {
        name: "Treadmill Intervals",
        description: "Alternating fast and recovery paces on a treadmill.",
        difficulty: Difficulty::Expert,
        target: MuscleGroup::LowerBody,
        duration_seconds: 120,
        rest_seconds: 60,
        calories_per_minute: 11.0,
        equipment: "treadmill",
        category: "endurance",
        safety_tips: None,
        secondary_groups: &[],
    },
];

/// Populate an empty store with the muscle-group taxonomy, a starter set of
/// exercises with instructions and videos, and two public workouts.
pub fn seed_catalog(store: &CatalogStore) -> Result<()> {
    seed_muscle_groups(store);

    let group_ids: HashMap<String, u64> = store
        .muscle_groups()
        .into_iter()
        .map(|record| (record.name.clone(), record.id))
        .collect();

    let mut exercise_ids: HashMap<&'static str, u64> = HashMap::new();
    for seed in &SEED_EXERCISES {
        let detail = store.create_exercise(NewExercise {
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            difficulty: seed.difficulty,
            target_muscle_group: seed.target,
            default_duration_seconds: seed.duration_seconds,
            default_rest_duration_seconds: seed.rest_seconds,
            instructions: None,
            safety_tips: seed.safety_tips.map(str::to_string),
            calories_burned_per_minute: Some(seed.calories_per_minute),
            equipment_needed: Some(seed.equipment.to_string()),
            category: Some(seed.category.to_string()),
            demo_gif_url: None,
        })?;

        for group in seed.secondary_groups {
            if let Some(&group_id) = group_ids.get(group.as_str()) {
                store.link_muscle_group(detail.exercise.id, group_id, false, Some(40.0))?;
            }
        }
        exercise_ids.insert(seed.name, detail.exercise.id);
    }

    seed_instructions(store, &exercise_ids)?;
    seed_videos(store, &exercise_ids)?;
    seed_workouts(store, &exercise_ids)?;
    Ok(())
}

fn seed_muscle_groups(store: &CatalogStore) {
    let groups = [
        (
            "core",
            "Abdominals, obliques, and lower back",
            "rectus abdominis, obliques",
            "erector spinae, hip flexors",
            "Improves posture, stability, and force transfer",
        ),
        (
            "upper_body",
            "Chest, back, shoulders, and arms",
            "pectorals, lats, deltoids",
            "biceps, triceps, forearms",
            "Builds pushing and pulling strength",
        ),
        (
            "lower_body",
            "Glutes, thighs, and calves",
            "quadriceps, hamstrings, glutes",
            "calves, adductors",
            "Develops leg drive, speed, and balance",
        ),
    ];

    let mut data = store.data.write();
    for (name, description, primary, secondary, benefits) in groups {
        data.counters.muscle_group += 1;
        let record = MuscleGroupRecord {
            id: data.counters.muscle_group,
            name: name.to_string(),
            description: Some(description.to_string()),
            primary_muscles: Some(primary.to_string()),
            secondary_muscles: Some(secondary.to_string()),
            exercise_benefits: Some(benefits.to_string()),
        };
        data.muscle_groups.insert(record.id, record);
    }
}

fn seed_instructions(store: &CatalogStore, ids: &HashMap<&'static str, u64>) -> Result<()> {
    let steps: [(&str, &[(InstructionType, &str, u32, bool)]); 3] = [
        (
            "Push Up",
            &[
                (InstructionType::Setup, "Place hands slightly wider than shoulder width.", 1, false),
                (InstructionType::Execution, "Lower the chest to just above the floor, then press back up.", 2, false),
                (InstructionType::Breathing, "Inhale on the way down, exhale on the press.", 3, false),
            ],
        ),
        (
            "Plank",
            &[
                (InstructionType::Setup, "Stack elbows under shoulders, feet hip width apart.", 1, false),
                (InstructionType::Execution, "Brace the trunk and hold a straight line from head to heels.", 2, true),
            ],
        ),
        (
            "Bodyweight Squat",
            &[
                (InstructionType::Setup, "Stand with feet shoulder width apart, toes slightly out.", 1, false),
                (InstructionType::Execution, "Sit the hips back and down until thighs are parallel.", 2, false),
                (InstructionType::CommonMistakes, "Heels lifting off the floor means the stance is too narrow.", 3, true),
            ],
        ),
    ];

    for (name, items) in steps {
        if let Some(&exercise_id) = ids.get(name) {
            let new_instructions = items
                .iter()
                .map(|&(instruction_type, text, order, critical)| NewInstruction {
                    instruction_type,
                    instruction_text: text.to_string(),
                    step_order: Some(order),
                    is_critical: critical,
                })
                .collect();
            store.add_instructions(exercise_id, new_instructions)?;
        }
    }
    Ok(())
}

fn seed_videos(store: &CatalogStore, ids: &HashMap<&'static str, u64>) -> Result<()> {
    let videos = [
        (
            "Push Up",
            "Push Up Form Guide",
            "https://videos.fitcontent.dev/push-up-form.mp4",
            VideoType::FormGuide,
            95,
        ),
        (
            "Bodyweight Squat",
            "Bodyweight Squat Demonstration",
            "https://videos.fitcontent.dev/squat-demo.mp4",
            VideoType::Demonstration,
            70,
        ),
    ];

    for (name, title, url, video_type, duration) in videos {
        if let Some(&exercise_id) = ids.get(name) {
            store.link_video(
                exercise_id,
                NewVideo {
                    video_title: title.to_string(),
                    video_url: url.to_string(),
                    video_description: None,
                    duration_seconds: Some(duration),
                    video_type,
                    thumbnail_url: None,
                    video_quality: VideoQuality::Q720,
                    file_size_mb: None,
                },
            )?;
        }
    }
    Ok(())
}

fn seed_workouts(store: &CatalogStore, ids: &HashMap<&'static str, u64>) -> Result<()> {
    let workouts: [(&str, &str, Difficulty, &[MuscleGroup], u32, &[&str]); 2] = [
        (
            "Core Starter",
            "Gentle introduction to core training.",
            Difficulty::Beginner,
            &[MuscleGroup::Core],
            12,
            &["Plank", "Crunches", "Mountain Climbers"],
        ),
        (
            "Full Body Burner",
            "No-equipment circuit hitting every major muscle group.",
            Difficulty::Medium,
            &[MuscleGroup::Core, MuscleGroup::UpperBody, MuscleGroup::LowerBody],
            25,
            &["Push Up", "Bodyweight Squat", "Walking Lunges", "Burpees"],
        ),
    ];

    for (name, description, difficulty, groups, minutes, exercise_names) in workouts {
        let exercises: Vec<NewWorkoutExercise> = exercise_names
            .iter()
            .enumerate()
            .filter_map(|(index, exercise_name)| {
                ids.get(exercise_name).map(|&exercise_id| NewWorkoutExercise {
                    exercise_id,
                    order_sequence: index as u32 + 1,
                    custom_duration_seconds: None,
                    custom_rest_duration_seconds: None,
                    sets_count: Some(3),
                })
            })
            .collect();

        store.create_workout(NewWorkout {
            name: name.to_string(),
            description: Some(description.to_string()),
            difficulty,
            target_muscle_groups: groups.to_vec(),
            workout_type: WorkoutType::Both,
            total_duration_minutes: Some(minutes),
            created_by: None,
            is_public: true,
            is_system_generated: true,
            estimated_calories_burned: None,
            exercises,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(store.is_empty());

        seed_catalog(&store).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.exercise_count(), SEED_EXERCISE_COUNT);
        assert_eq!(store.workout_count(), 2);
        assert_eq!(store.muscle_groups().len(), 3);
    }

    #[test]
    fn test_seeded_exercises_have_linked_groups() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        seed_catalog(&store).unwrap();

        for exercise in store.all_exercises() {
            let (_, attributes) = store.exercise_attributes(exercise.id).unwrap();
            assert!(
                !attributes.muscle_groups.is_empty(),
                "{} has no linked muscle groups",
                exercise.name
            );
        }
    }
}
