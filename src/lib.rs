//! # fitcontent
//!
//! A content-catalog microservice for fitness applications: exercises,
//! workouts, muscle-group taxonomies, instructional steps, and video links,
//! with CRUD and search endpoints plus the feature-vector and similarity
//! endpoints consumed by an external recommendation component.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install fitcontent
//! fitcontent --http-port 8080 --data-dir ./data
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use fitcontent::prelude::*;
//!
//! let store = CatalogStore::open("./data").unwrap();
//! let (_, attributes) = store.exercise_attributes(1).unwrap();
//! let vector = encode(&attributes);
//! let score = cosine_similarity(&vector, &vector);
//! assert!((score - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Crate Structure
//!
//! fitcontent is composed of several crates:
//!
//! - `fitcontent-core` - Catalog entities and query filters
//! - `fitcontent-similarity` - Feature-vector encoder and cosine comparator
//! - `fitcontent-storage` - In-memory catalog store with snapshot persistence
//! - `fitcontent-api` - REST endpoints under `/content`
//!
//! ## Features
//!
//! - **Content CRUD**: exercises, workouts, instructions, and video links
//! - **Discovery**: filtered lists, a paginated library, combined search
//! - **Recommendation Support**: fixed-shape feature vectors and exact
//!   cosine-similarity scoring
//! - **Persistence**: compressed catalog snapshots with checksum
//!   verification and periodic background saves

// Re-export core types
pub use fitcontent_core::{
    ContentKind, ContentQuery, Difficulty, Error, Exercise, ExercisePatch, ExerciseQuery,
    Instruction, InstructionPatch, InstructionType, LibraryQuery, LibraryStats, MuscleGroup,
    MuscleGroupLink, MuscleGroupRecord, NewExercise, NewInstruction, NewVideo, NewWorkout,
    NewWorkoutExercise, Result, Video, VideoPatch, VideoQuality, VideoType, Workout,
    WorkoutExercise, WorkoutQuery, WorkoutType,
};

// Re-export the feature pipeline
pub use fitcontent_similarity::{
    cosine_similarity, cosine_similarity_flat, encode, ExerciseAttributes, FeatureVector,
};

// Re-export storage
pub use fitcontent_storage::{seed_catalog, CatalogStore, ExerciseDetail, WorkoutDetail};

// Re-export API
pub use fitcontent_api::{RestApi, ServiceConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cosine_similarity, encode, seed_catalog, CatalogStore, Difficulty, Error,
        Exercise, ExerciseAttributes, FeatureVector, MuscleGroup, NewExercise, NewWorkout,
        RestApi, Result, ServiceConfig, Workout,
    };
}
