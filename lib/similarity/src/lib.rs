//! # fitcontent Similarity
//!
//! The feature-vector encoder and cosine-similarity comparator behind the
//! catalog's recommendation endpoints.
//!
//! The pipeline is linear and stateless: a read-only
//! [`ExerciseAttributes`] projection of a catalog exercise is encoded into a
//! fixed-shape [`FeatureVector`], and two feature vectors are compared with
//! exact floating-point [`cosine_similarity`]. Both operations are pure
//! functions with no I/O and may be invoked concurrently without
//! coordination; fetching a consistent attribute snapshot is the caller's
//! job.
//!
//! ## Example
//!
//! ```rust
//! use fitcontent_similarity::{cosine_similarity, encode, ExerciseAttributes};
//!
//! let attributes = ExerciseAttributes {
//!     difficulty_level: "expert".to_string(),
//!     muscle_groups: vec!["core".to_string()],
//!     duration_seconds: 60,
//!     calories_per_minute: Some(10.0),
//!     equipment: Some(String::new()),
//!     category: Some("strength".to_string()),
//!     instruction_count: 3,
//! };
//!
//! let vector = encode(&attributes);
//! assert_eq!(vector.difficulty_numeric, 3);
//! assert!((cosine_similarity(&vector, &vector) - 1.0).abs() < 1e-9);
//! ```

pub mod distance;
pub mod encoder;
pub mod features;

pub use distance::{cosine_similarity, cosine_similarity_flat};
pub use encoder::{
    difficulty_numeric, encode, encode_category, encode_equipment, encode_muscle_groups,
};
pub use features::{ExerciseAttributes, FeatureVector, FLAT_LEN};
