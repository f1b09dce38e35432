//! # fitcontent Storage
//!
//! Storage layer for the fitcontent catalog service: the in-memory
//! [`CatalogStore`], gzip-compressed bincode snapshot persistence with
//! atomic writes and checksum verification, and the starter seed data.

pub mod catalog;
mod persistence;
pub mod seed;

pub use catalog::{
    CatalogStore, ExerciseDetail, LibraryPage, Pagination, WorkoutDetail, WorkoutExerciseDetail,
};
pub use seed::seed_catalog;
