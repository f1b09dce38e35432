//! # fitcontent Core
//!
//! Core domain model for the fitcontent catalog service.
//!
//! This crate provides the catalog entities and the query filters applied to
//! them:
//!
//! - [`Exercise`] - a catalog exercise with difficulty, targeting, and
//!   equipment metadata
//! - [`Workout`] - a curated exercise sequence with
//!   [`WorkoutExercise`] links
//! - [`MuscleGroupRecord`] - the muscle-group taxonomy rows exercises are
//!   linked to
//! - [`Instruction`] / [`Video`] - instructional steps and video links
//! - [`ExerciseQuery`], [`LibraryQuery`], [`WorkoutQuery`], [`ContentQuery`] -
//!   typed list/search filters
//!
//! ## Example
//!
//! ```rust
//! use fitcontent_core::{Difficulty, MuscleGroup};
//!
//! assert_eq!(Difficulty::Expert.numeric(), 3);
//! assert_eq!(MuscleGroup::UpperBody.as_str(), "upper_body");
//! ```

pub mod error;
pub mod exercise;
pub mod filter;
pub mod instruction;
pub mod muscle;
pub mod video;
pub mod workout;

pub use error::{Error, Result};
pub use exercise::{Difficulty, Exercise, ExercisePatch, MuscleGroup, NewExercise};
pub use filter::{
    ContentKind, ContentQuery, ExerciseQuery, LibraryQuery, LibraryStats, WorkoutQuery,
};
pub use instruction::{Instruction, InstructionPatch, InstructionType, NewInstruction};
pub use muscle::{MuscleGroupLink, MuscleGroupRecord};
pub use video::{NewVideo, Video, VideoPatch, VideoQuality, VideoType};
pub use workout::{NewWorkout, NewWorkoutExercise, Workout, WorkoutExercise, WorkoutType};
