use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use fitcontent_core::{
    ContentQuery, Difficulty, Error, Exercise, ExercisePatch, ExerciseQuery, Instruction,
    InstructionPatch, LibraryQuery, LibraryStats, MuscleGroup, MuscleGroupLink, MuscleGroupRecord,
    NewExercise, NewInstruction, NewVideo, NewWorkout, Result, Video, VideoPatch, Workout,
    WorkoutExercise, WorkoutQuery,
};
use fitcontent_similarity::ExerciseAttributes;

use crate::persistence::SnapshotStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IdCounters {
    pub exercise: u64,
    pub workout: u64,
    pub instruction: u64,
    pub video: u64,
    pub muscle_group: u64,
}

/// All catalog state. Serialized wholesale into snapshots.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct CatalogData {
    pub exercises: AHashMap<u64, Exercise>,
    pub muscle_groups: AHashMap<u64, MuscleGroupRecord>,
    /// Muscle-group links keyed by exercise id.
    pub muscle_links: AHashMap<u64, Vec<MuscleGroupLink>>,
    pub workouts: AHashMap<u64, Workout>,
    /// Exercise links keyed by workout id, kept in sequence order.
    pub workout_exercises: AHashMap<u64, Vec<WorkoutExercise>>,
    pub instructions: AHashMap<u64, Instruction>,
    pub videos: AHashMap<u64, Video>,
    pub counters: IdCounters,
}

/// An exercise with its loaded associations, as returned by read endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseDetail {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub muscle_groups: Vec<MuscleGroupRecord>,
    pub instructions: Vec<Instruction>,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutExerciseDetail {
    #[serde(flatten)]
    pub link: WorkoutExercise,
    pub exercise: Exercise,
}

/// A workout with its exercise sequence resolved.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_exercises: Option<Vec<WorkoutExerciseDetail>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// One page of the exercise library plus aggregate filter stats.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryPage {
    pub exercises: Vec<Exercise>,
    pub pagination: Pagination,
    pub stats: LibraryStats,
}

/// In-memory catalog store with snapshot persistence.
///
/// All reads and writes go through a single `parking_lot::RwLock`, which
/// also gives the feature pipeline its consistent snapshot: an exercise row,
/// its muscle-group links, and its instruction count are always read under
/// one lock acquisition.
pub struct CatalogStore {
    pub(crate) data: RwLock<CatalogData>,
    snapshots: SnapshotStore,
}

impl CatalogStore {
    /// Open the store, restoring the snapshot in `data_dir` when present.
    ///
    /// A corrupt or unreadable snapshot is reported and skipped; the service
    /// starts with an empty catalog rather than refusing to boot.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let snapshots =
            SnapshotStore::new(data_dir).map_err(|e| Error::Storage(e.to_string()))?;

        let data = match snapshots.load() {
            Ok(Some(envelope)) => {
                info!(
                    exercises = envelope.data.exercises.len(),
                    workouts = envelope.data.workouts.len(),
                    created_at = envelope.created_at,
                    "catalog snapshot loaded"
                );
                envelope.data
            }
            Ok(None) => CatalogData::default(),
            Err(e) => {
                warn!("discarding unreadable catalog snapshot: {e}");
                CatalogData::default()
            }
        };

        Ok(Self {
            data: RwLock::new(data),
            snapshots,
        })
    }

    /// Persist the current catalog state.
    pub fn save(&self) -> Result<()> {
        let data = self.data.read();
        self.snapshots
            .save(&data)
            .map_err(|e| Error::Storage(e.to_string()))
    }

    /// Save the catalog on a background thread at a fixed interval.
    pub fn start_background_save(self: &Arc<Self>, interval: Duration) {
        let store = Arc::clone(self);
        std::thread::spawn(move || loop {
            std::thread::sleep(interval);
            if let Err(e) = store.save() {
                error!("background save failed: {e}");
            }
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let data = self.data.read();
        data.exercises.is_empty() && data.workouts.is_empty() && data.muscle_groups.is_empty()
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.data.read().exercises.len()
    }

    #[must_use]
    pub fn workout_count(&self) -> usize {
        self.data.read().workouts.len()
    }

    // ==================== Exercises ====================

    pub fn create_exercise(&self, new: NewExercise) -> Result<ExerciseDetail> {
        new.validate()?;
        let mut data = self.data.write();
        data.counters.exercise += 1;
        let id = data.counters.exercise;
        let now = Utc::now();

        let exercise = Exercise {
            id,
            name: new.name.trim().to_string(),
            description: new.description,
            difficulty: new.difficulty,
            target_muscle_group: new.target_muscle_group,
            default_duration_seconds: new.default_duration_seconds,
            default_rest_duration_seconds: new.default_rest_duration_seconds,
            instructions: new.instructions,
            safety_tips: new.safety_tips,
            calories_burned_per_minute: new.calories_burned_per_minute,
            equipment_needed: new.equipment_needed,
            category: new.category,
            demo_gif_url: new.demo_gif_url,
            created_at: now,
            updated_at: now,
        };

        if let Some(muscle_group_id) = taxonomy_id(&data, exercise.target_muscle_group) {
            data.muscle_links.entry(id).or_default().push(MuscleGroupLink {
                muscle_group_id,
                primary_target: true,
                activation_percentage: Some(100.0),
            });
        }

        data.exercises.insert(id, exercise.clone());
        Ok(build_exercise_detail(&data, exercise))
    }

    pub fn update_exercise(&self, id: u64, patch: &ExercisePatch) -> Result<ExerciseDetail> {
        patch.validate()?;
        let mut data = self.data.write();
        let mut exercise = data
            .exercises
            .get(&id)
            .cloned()
            .ok_or(Error::ExerciseNotFound(id))?;

        let previous_target = exercise.target_muscle_group;
        patch.apply(&mut exercise);
        exercise.updated_at = Utc::now();

        if exercise.target_muscle_group != previous_target {
            retarget_primary_link(&mut data, id, exercise.target_muscle_group);
        }

        data.exercises.insert(id, exercise.clone());
        Ok(build_exercise_detail(&data, exercise))
    }

    pub fn exercise(&self, id: u64) -> Result<Exercise> {
        self.data
            .read()
            .exercises
            .get(&id)
            .cloned()
            .ok_or(Error::ExerciseNotFound(id))
    }

    pub fn exercise_detail(&self, id: u64) -> Result<ExerciseDetail> {
        let data = self.data.read();
        let exercise = data
            .exercises
            .get(&id)
            .cloned()
            .ok_or(Error::ExerciseNotFound(id))?;
        Ok(build_exercise_detail(&data, exercise))
    }

    #[must_use]
    pub fn exercises(&self, query: &ExerciseQuery) -> Vec<ExerciseDetail> {
        let data = self.data.read();
        let mut matched: Vec<&Exercise> =
            data.exercises.values().filter(|e| query.matches(e)).collect();
        matched.sort_by_key(|e| e.id);
        matched.truncate(query.effective_limit());
        matched
            .into_iter()
            .map(|e| build_exercise_detail(&data, e.clone()))
            .collect()
    }

    #[must_use]
    pub fn exercises_by_muscle_group(&self, group: MuscleGroup) -> Vec<ExerciseDetail> {
        let data = self.data.read();
        let mut matched: Vec<&Exercise> = data
            .exercises
            .values()
            .filter(|e| e.target_muscle_group == group)
            .collect();
        matched.sort_by(|a, b| {
            a.difficulty
                .cmp(&b.difficulty)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.id.cmp(&b.id))
        });
        matched
            .into_iter()
            .map(|e| build_exercise_detail(&data, e.clone()))
            .collect()
    }

    #[must_use]
    pub fn exercises_by_difficulty(&self, difficulty: Difficulty) -> Vec<ExerciseDetail> {
        let data = self.data.read();
        let mut matched: Vec<&Exercise> = data
            .exercises
            .values()
            .filter(|e| e.difficulty == difficulty)
            .collect();
        matched.sort_by(|a, b| {
            a.target_muscle_group
                .cmp(&b.target_muscle_group)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.id.cmp(&b.id))
        });
        matched
            .into_iter()
            .map(|e| build_exercise_detail(&data, e.clone()))
            .collect()
    }

    #[must_use]
    pub fn library_page(&self, query: &LibraryQuery) -> LibraryPage {
        let data = self.data.read();
        let mut matched: Vec<&Exercise> =
            data.exercises.values().filter(|e| query.matches(e)).collect();
        matched.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matched.len();
        let per_page = query.effective_per_page();
        let current_page = query.effective_page();
        let last_page = total.div_ceil(per_page).max(1);
        let exercises: Vec<Exercise> = matched
            .into_iter()
            .skip((current_page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        LibraryPage {
            exercises,
            pagination: Pagination {
                current_page,
                last_page,
                per_page,
                total,
            },
            stats: LibraryStats::collect(data.exercises.values()),
        }
    }

    #[must_use]
    pub fn all_exercises(&self) -> Vec<Exercise> {
        let data = self.data.read();
        let mut exercises: Vec<Exercise> = data.exercises.values().cloned().collect();
        exercises.sort_by_key(|e| e.id);
        exercises
    }

    #[must_use]
    pub fn search_content(&self, query: &ContentQuery) -> (Vec<ExerciseDetail>, Vec<WorkoutDetail>) {
        let data = self.data.read();
        let limit = query.effective_limit();

        let exercises = if query.kind.includes_exercises() {
            let mut matched: Vec<&Exercise> = data
                .exercises
                .values()
                .filter(|e| query.matches_exercise(e))
                .collect();
            matched.sort_by_key(|e| e.id);
            matched.truncate(limit);
            matched
                .into_iter()
                .map(|e| build_exercise_detail(&data, e.clone()))
                .collect()
        } else {
            Vec::new()
        };

        let workouts = if query.kind.includes_workouts() {
            let mut matched: Vec<&Workout> = data
                .workouts
                .values()
                .filter(|w| query.matches_workout(w))
                .collect();
            matched.sort_by_key(|w| w.id);
            matched.truncate(limit);
            matched
                .into_iter()
                .map(|w| build_workout_detail(&data, w.clone(), false))
                .collect()
        } else {
            Vec::new()
        };

        (exercises, workouts)
    }

    // ==================== Workouts ====================

    /// Create a workout and its exercise sequence.
    ///
    /// Every referenced exercise is checked before anything is inserted, so
    /// a missing exercise never leaves a partially created workout behind.
    pub fn create_workout(&self, new: NewWorkout) -> Result<WorkoutDetail> {
        new.validate()?;
        let mut data = self.data.write();

        for item in &new.exercises {
            if !data.exercises.contains_key(&item.exercise_id) {
                return Err(Error::ExerciseNotFound(item.exercise_id));
            }
        }

        data.counters.workout += 1;
        let id = data.counters.workout;
        let now = Utc::now();

        let workout = Workout {
            id,
            name: new.name.trim().to_string(),
            description: new.description,
            total_duration_minutes: new.total_duration_minutes,
            difficulty: new.difficulty,
            target_muscle_groups: new.target_muscle_groups,
            workout_type: new.workout_type,
            created_by: new.created_by,
            is_public: new.is_public,
            is_system_generated: new.is_system_generated,
            total_exercises: new.exercises.len() as u32,
            estimated_calories_burned: new.estimated_calories_burned,
            created_at: now,
            updated_at: now,
        };

        let mut links: Vec<WorkoutExercise> = new
            .exercises
            .iter()
            .map(|item| WorkoutExercise {
                workout_id: id,
                exercise_id: item.exercise_id,
                order_sequence: item.order_sequence,
                custom_duration_seconds: item.custom_duration_seconds,
                custom_rest_duration_seconds: item.custom_rest_duration_seconds,
                sets_count: item.sets_count,
            })
            .collect();
        links.sort_by_key(|link| link.order_sequence);

        data.workouts.insert(id, workout.clone());
        data.workout_exercises.insert(id, links);
        Ok(build_workout_detail(&data, workout, true))
    }

    pub fn workout_detail(&self, id: u64) -> Result<WorkoutDetail> {
        let data = self.data.read();
        let workout = data
            .workouts
            .get(&id)
            .cloned()
            .ok_or(Error::WorkoutNotFound(id))?;
        Ok(build_workout_detail(&data, workout, true))
    }

    /// Public workouts matching the optional difficulty/muscle-group pair,
    /// ordered by name.
    #[must_use]
    pub fn workouts_filtered(
        &self,
        difficulty: Option<Difficulty>,
        muscle_group: Option<MuscleGroup>,
    ) -> Vec<WorkoutDetail> {
        let data = self.data.read();
        let mut matched: Vec<&Workout> = data
            .workouts
            .values()
            .filter(|w| w.is_public)
            .filter(|w| difficulty.map_or(true, |d| w.difficulty == d))
            .filter(|w| muscle_group.map_or(true, |g| w.target_muscle_groups.contains(&g)))
            .collect();
        sort_workouts_by_name(&mut matched);
        matched
            .into_iter()
            .map(|w| build_workout_detail(&data, w.clone(), false))
            .collect()
    }

    #[must_use]
    pub fn search_workouts(&self, query: &WorkoutQuery) -> Vec<WorkoutDetail> {
        let data = self.data.read();
        let mut matched: Vec<&Workout> = data
            .workouts
            .values()
            .filter(|w| w.is_public && query.matches(w))
            .collect();
        sort_workouts_by_name(&mut matched);
        matched
            .into_iter()
            .map(|w| build_workout_detail(&data, w.clone(), false))
            .collect()
    }

    // ==================== Instructions ====================

    pub fn instructions_for(&self, exercise_id: u64) -> Result<(Exercise, Vec<Instruction>)> {
        let data = self.data.read();
        let exercise = data
            .exercises
            .get(&exercise_id)
            .cloned()
            .ok_or(Error::ExerciseNotFound(exercise_id))?;
        let mut instructions: Vec<Instruction> = data
            .instructions
            .values()
            .filter(|i| i.exercise_id == exercise_id)
            .cloned()
            .collect();
        instructions.sort_by_key(|i| (i.instruction_type, i.step_order, i.id));
        Ok((exercise, instructions))
    }

    pub fn add_instructions(
        &self,
        exercise_id: u64,
        items: Vec<NewInstruction>,
    ) -> Result<Vec<Instruction>> {
        if items.is_empty() {
            return Err(Error::InvalidInput(
                "at least one instruction is required".into(),
            ));
        }
        for item in &items {
            item.validate()?;
        }

        let mut data = self.data.write();
        if !data.exercises.contains_key(&exercise_id) {
            return Err(Error::ExerciseNotFound(exercise_id));
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            data.counters.instruction += 1;
            let instruction = Instruction {
                id: data.counters.instruction,
                exercise_id,
                instruction_type: item.instruction_type,
                instruction_text: item.instruction_text,
                step_order: item.step_order,
                is_critical: item.is_critical,
                created_at: now,
                updated_at: now,
            };
            data.instructions.insert(instruction.id, instruction.clone());
            created.push(instruction);
        }
        Ok(created)
    }

    pub fn update_instruction(&self, id: u64, patch: &InstructionPatch) -> Result<Instruction> {
        patch.validate()?;
        let mut data = self.data.write();
        let instruction = data
            .instructions
            .get_mut(&id)
            .ok_or(Error::InstructionNotFound(id))?;
        patch.apply(instruction);
        instruction.updated_at = Utc::now();
        Ok(instruction.clone())
    }

    pub fn delete_instruction(&self, id: u64) -> Result<()> {
        let mut data = self.data.write();
        data.instructions
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::InstructionNotFound(id))
    }

    // ==================== Videos ====================

    pub fn videos_for(&self, exercise_id: u64) -> Result<(Exercise, Vec<Video>)> {
        let data = self.data.read();
        let exercise = data
            .exercises
            .get(&exercise_id)
            .cloned()
            .ok_or(Error::ExerciseNotFound(exercise_id))?;
        let mut videos: Vec<Video> = data
            .videos
            .values()
            .filter(|v| v.exercise_id == exercise_id && v.is_active)
            .cloned()
            .collect();
        videos.sort_by_key(|v| (v.video_type, v.id));
        Ok((exercise, videos))
    }

    pub fn link_video(&self, exercise_id: u64, new: NewVideo) -> Result<Video> {
        new.validate()?;
        let mut data = self.data.write();
        if !data.exercises.contains_key(&exercise_id) {
            return Err(Error::ExerciseNotFound(exercise_id));
        }

        data.counters.video += 1;
        let video = Video {
            id: data.counters.video,
            exercise_id,
            video_title: new.video_title,
            video_url: new.video_url,
            video_description: new.video_description,
            duration_seconds: new.duration_seconds,
            video_type: new.video_type,
            thumbnail_url: new.thumbnail_url,
            video_quality: new.video_quality,
            file_size_mb: new.file_size_mb,
            is_active: true,
            created_at: Utc::now(),
        };
        data.videos.insert(video.id, video.clone());
        Ok(video)
    }

    pub fn update_video(&self, id: u64, patch: &VideoPatch) -> Result<Video> {
        patch.validate()?;
        let mut data = self.data.write();
        let video = data.videos.get_mut(&id).ok_or(Error::VideoNotFound(id))?;
        patch.apply(video);
        Ok(video.clone())
    }

    pub fn delete_video(&self, id: u64) -> Result<()> {
        let mut data = self.data.write();
        data.videos
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::VideoNotFound(id))
    }

    // ==================== Muscle-group taxonomy ====================

    #[must_use]
    pub fn muscle_groups(&self) -> Vec<MuscleGroupRecord> {
        let data = self.data.read();
        let mut groups: Vec<MuscleGroupRecord> = data.muscle_groups.values().cloned().collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    /// Link an exercise to a taxonomy row. Re-linking an already linked
    /// group is a no-op.
    pub fn link_muscle_group(
        &self,
        exercise_id: u64,
        muscle_group_id: u64,
        primary_target: bool,
        activation_percentage: Option<f64>,
    ) -> Result<()> {
        let mut data = self.data.write();
        if !data.exercises.contains_key(&exercise_id) {
            return Err(Error::ExerciseNotFound(exercise_id));
        }
        if !data.muscle_groups.contains_key(&muscle_group_id) {
            return Err(Error::MuscleGroupNotFound(muscle_group_id));
        }
        let links = data.muscle_links.entry(exercise_id).or_default();
        if links.iter().all(|link| link.muscle_group_id != muscle_group_id) {
            links.push(MuscleGroupLink {
                muscle_group_id,
                primary_target,
                activation_percentage,
            });
        }
        Ok(())
    }

    // ==================== Feature pipeline support ====================

    /// Assemble the attribute projection consumed by the feature encoder.
    ///
    /// The exercise row, its muscle-group link names, and its instruction
    /// count are read under a single lock acquisition.
    pub fn exercise_attributes(&self, id: u64) -> Result<(Exercise, ExerciseAttributes)> {
        let data = self.data.read();
        let exercise = data
            .exercises
            .get(&id)
            .cloned()
            .ok_or(Error::ExerciseNotFound(id))?;
        let attributes = build_attributes(&data, &exercise);
        Ok((exercise, attributes))
    }

    /// Attribute projections for the whole catalog, ordered by exercise id.
    #[must_use]
    pub fn all_exercise_attributes(&self) -> Vec<(Exercise, ExerciseAttributes)> {
        let data = self.data.read();
        let mut exercises: Vec<Exercise> = data.exercises.values().cloned().collect();
        exercises.sort_by_key(|e| e.id);
        exercises
            .into_iter()
            .map(|e| {
                let attributes = build_attributes(&data, &e);
                (e, attributes)
            })
            .collect()
    }
}

fn taxonomy_id(data: &CatalogData, group: MuscleGroup) -> Option<u64> {
    data.muscle_groups
        .iter()
        .find(|(_, record)| record.name == group.as_str())
        .map(|(id, _)| *id)
}

fn retarget_primary_link(data: &mut CatalogData, exercise_id: u64, group: MuscleGroup) {
    let group_id = taxonomy_id(data, group);
    let links = data.muscle_links.entry(exercise_id).or_default();
    links.retain(|link| !link.primary_target);
    if let Some(muscle_group_id) = group_id {
        if links.iter().all(|link| link.muscle_group_id != muscle_group_id) {
            links.push(MuscleGroupLink {
                muscle_group_id,
                primary_target: true,
                activation_percentage: Some(100.0),
            });
        }
    }
}

fn build_exercise_detail(data: &CatalogData, exercise: Exercise) -> ExerciseDetail {
    let muscle_groups = data
        .muscle_links
        .get(&exercise.id)
        .map(|links| {
            links
                .iter()
                .filter_map(|link| data.muscle_groups.get(&link.muscle_group_id).cloned())
                .collect()
        })
        .unwrap_or_default();

    let mut instructions: Vec<Instruction> = data
        .instructions
        .values()
        .filter(|i| i.exercise_id == exercise.id)
        .cloned()
        .collect();
    instructions.sort_by_key(|i| (i.instruction_type, i.step_order, i.id));

    let mut videos: Vec<Video> = data
        .videos
        .values()
        .filter(|v| v.exercise_id == exercise.id && v.is_active)
        .cloned()
        .collect();
    videos.sort_by_key(|v| (v.video_type, v.id));

    ExerciseDetail {
        exercise,
        muscle_groups,
        instructions,
        videos,
    }
}

fn build_workout_detail(data: &CatalogData, workout: Workout, with_links: bool) -> WorkoutDetail {
    let links = data
        .workout_exercises
        .get(&workout.id)
        .cloned()
        .unwrap_or_default();
    let exercises: Vec<Exercise> = links
        .iter()
        .filter_map(|link| data.exercises.get(&link.exercise_id).cloned())
        .collect();
    let workout_exercises = with_links.then(|| {
        links
            .iter()
            .filter_map(|link| {
                data.exercises.get(&link.exercise_id).cloned().map(|exercise| {
                    WorkoutExerciseDetail {
                        link: link.clone(),
                        exercise,
                    }
                })
            })
            .collect()
    });

    WorkoutDetail {
        workout,
        exercises,
        workout_exercises,
    }
}

fn sort_workouts_by_name(workouts: &mut [&Workout]) {
    workouts.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn build_attributes(data: &CatalogData, exercise: &Exercise) -> ExerciseAttributes {
    let muscle_groups = data
        .muscle_links
        .get(&exercise.id)
        .map(|links| {
            links
                .iter()
                .filter_map(|link| {
                    data.muscle_groups
                        .get(&link.muscle_group_id)
                        .map(|record| record.name.clone())
                })
                .collect()
        })
        .unwrap_or_default();

    let instruction_count = data
        .instructions
        .values()
        .filter(|i| i.exercise_id == exercise.id)
        .count() as u32;

    ExerciseAttributes {
        difficulty_level: exercise.difficulty.as_str().to_string(),
        muscle_groups,
        duration_seconds: exercise.default_duration_seconds,
        calories_per_minute: exercise.calories_burned_per_minute,
        equipment: exercise.equipment_needed.clone(),
        category: exercise.category.clone(),
        instruction_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcontent_core::{InstructionType, NewWorkoutExercise, WorkoutType};

    fn open_store() -> (CatalogStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        crate::seed::seed_catalog(&store).unwrap();
        (store, dir)
    }

    fn new_exercise(name: &str) -> NewExercise {
        NewExercise {
            name: name.to_string(),
            description: None,
            difficulty: Difficulty::Medium,
            target_muscle_group: MuscleGroup::Core,
            default_duration_seconds: 45,
            default_rest_duration_seconds: 15,
            instructions: None,
            safety_tips: None,
            calories_burned_per_minute: Some(8.0),
            equipment_needed: Some("none".to_string()),
            category: Some("strength".to_string()),
            demo_gif_url: None,
        }
    }

    #[test]
    fn test_create_and_fetch_exercise() {
        let (store, _dir) = open_store();
        let created = store.create_exercise(new_exercise("Hollow Hold")).unwrap();
        let fetched = store.exercise_detail(created.exercise.id).unwrap();
        assert_eq!(fetched.exercise.name, "Hollow Hold");
        // the primary target muscle group is linked on creation
        assert!(fetched
            .muscle_groups
            .iter()
            .any(|group| group.name == "core"));
    }

    #[test]
    fn test_exercise_not_found() {
        let (store, _dir) = open_store();
        assert!(matches!(
            store.exercise_detail(999_999),
            Err(Error::ExerciseNotFound(999_999))
        ));
    }

    #[test]
    fn test_update_exercise_retargets_primary_link() {
        let (store, _dir) = open_store();
        let created = store.create_exercise(new_exercise("Side Plank")).unwrap();
        let patch = ExercisePatch {
            target_muscle_group: Some(MuscleGroup::UpperBody),
            ..ExercisePatch::default()
        };
        let updated = store.update_exercise(created.exercise.id, &patch).unwrap();
        assert_eq!(updated.exercise.target_muscle_group, MuscleGroup::UpperBody);
        assert!(updated
            .muscle_groups
            .iter()
            .any(|group| group.name == "upper_body"));
        assert!(!updated.muscle_groups.iter().any(|group| group.name == "core"));
    }

    #[test]
    fn test_exercise_list_is_ordered_and_limited() {
        let (store, _dir) = open_store();
        let query = ExerciseQuery {
            limit: Some(3),
            ..ExerciseQuery::default()
        };
        let listed = store.exercises(&query);
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|w| w[0].exercise.id < w[1].exercise.id));
    }

    #[test]
    fn test_workout_creation_requires_existing_exercises() {
        let (store, _dir) = open_store();
        let before = store.workout_count();
        let new = NewWorkout {
            name: "Ghost Workout".to_string(),
            description: None,
            difficulty: Difficulty::Beginner,
            target_muscle_groups: vec![MuscleGroup::Core],
            workout_type: WorkoutType::Both,
            total_duration_minutes: Some(10),
            created_by: None,
            is_public: true,
            is_system_generated: false,
            estimated_calories_burned: None,
            exercises: vec![NewWorkoutExercise {
                exercise_id: 424_242,
                order_sequence: 1,
                custom_duration_seconds: None,
                custom_rest_duration_seconds: None,
                sets_count: None,
            }],
        };
        assert!(matches!(
            store.create_workout(new),
            Err(Error::ExerciseNotFound(424_242))
        ));
        // nothing was inserted
        assert_eq!(store.workout_count(), before);
    }

    #[test]
    fn test_workout_detail_orders_exercises_by_sequence() {
        let (store, _dir) = open_store();
        let first = store.create_exercise(new_exercise("A")).unwrap().exercise.id;
        let second = store.create_exercise(new_exercise("B")).unwrap().exercise.id;
        let new = NewWorkout {
            name: "Ordered".to_string(),
            description: None,
            difficulty: Difficulty::Medium,
            target_muscle_groups: vec![MuscleGroup::Core],
            workout_type: WorkoutType::Individual,
            total_duration_minutes: Some(12),
            created_by: None,
            is_public: true,
            is_system_generated: false,
            estimated_calories_burned: None,
            exercises: vec![
                NewWorkoutExercise {
                    exercise_id: second,
                    order_sequence: 2,
                    custom_duration_seconds: None,
                    custom_rest_duration_seconds: None,
                    sets_count: None,
                },
                NewWorkoutExercise {
                    exercise_id: first,
                    order_sequence: 1,
                    custom_duration_seconds: None,
                    custom_rest_duration_seconds: None,
                    sets_count: None,
                },
            ],
        };
        let detail = store.create_workout(new).unwrap();
        assert_eq!(detail.workout.total_exercises, 2);
        assert_eq!(detail.exercises[0].id, first);
        assert_eq!(detail.exercises[1].id, second);
    }

    #[test]
    fn test_instruction_lifecycle() {
        let (store, _dir) = open_store();
        let exercise_id = store.create_exercise(new_exercise("Bird Dog")).unwrap().exercise.id;

        let created = store
            .add_instructions(
                exercise_id,
                vec![NewInstruction {
                    instruction_type: InstructionType::Setup,
                    instruction_text: "Start on all fours".to_string(),
                    step_order: Some(1),
                    is_critical: false,
                }],
            )
            .unwrap();
        assert_eq!(created.len(), 1);

        let patch = InstructionPatch {
            is_critical: Some(true),
            ..InstructionPatch::default()
        };
        let updated = store.update_instruction(created[0].id, &patch).unwrap();
        assert!(updated.is_critical);

        store.delete_instruction(created[0].id).unwrap();
        assert!(matches!(
            store.delete_instruction(created[0].id),
            Err(Error::InstructionNotFound(_))
        ));
    }

    #[test]
    fn test_video_listing_skips_inactive() {
        let (store, _dir) = open_store();
        let exercise_id = store.create_exercise(new_exercise("Dead Bug")).unwrap().exercise.id;
        let video = store
            .link_video(
                exercise_id,
                NewVideo {
                    video_title: "Dead Bug Demo".to_string(),
                    video_url: "https://videos.example.com/deadbug.mp4".to_string(),
                    video_description: None,
                    duration_seconds: Some(60),
                    video_type: Default::default(),
                    thumbnail_url: None,
                    video_quality: Default::default(),
                    file_size_mb: None,
                },
            )
            .unwrap();

        let (_, videos) = store.videos_for(exercise_id).unwrap();
        assert_eq!(videos.len(), 1);

        let patch = VideoPatch {
            is_active: Some(false),
            ..VideoPatch::default()
        };
        store.update_video(video.id, &patch).unwrap();
        let (_, videos) = store.videos_for(exercise_id).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn test_exercise_attributes_snapshot() {
        let (store, _dir) = open_store();
        let exercise_id = store.create_exercise(new_exercise("V-Up")).unwrap().exercise.id;
        store
            .add_instructions(
                exercise_id,
                vec![
                    NewInstruction {
                        instruction_type: InstructionType::Setup,
                        instruction_text: "Lie flat".to_string(),
                        step_order: Some(1),
                        is_critical: false,
                    },
                    NewInstruction {
                        instruction_type: InstructionType::Execution,
                        instruction_text: "Fold at the hips".to_string(),
                        step_order: Some(2),
                        is_critical: false,
                    },
                ],
            )
            .unwrap();

        let (exercise, attributes) = store.exercise_attributes(exercise_id).unwrap();
        assert_eq!(exercise.id, exercise_id);
        assert_eq!(attributes.difficulty_level, "medium");
        assert_eq!(attributes.muscle_groups, vec!["core".to_string()]);
        assert_eq!(attributes.duration_seconds, 45);
        assert_eq!(attributes.instruction_count, 2);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let exercise_id;
        {
            let store = CatalogStore::open(dir.path()).unwrap();
            crate::seed::seed_catalog(&store).unwrap();
            exercise_id = store.create_exercise(new_exercise("Persisted")).unwrap().exercise.id;
            store.save().unwrap();
        }

        let reopened = CatalogStore::open(dir.path()).unwrap();
        let fetched = reopened.exercise(exercise_id).unwrap();
        assert_eq!(fetched.name, "Persisted");
        assert_eq!(reopened.exercise_count(), 1 + crate::seed::SEED_EXERCISE_COUNT);
    }
}
