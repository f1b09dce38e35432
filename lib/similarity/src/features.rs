//! Feature data model
//!
//! Defines the read-only attribute projection consumed by the encoder and
//! the fixed-shape feature vector it produces. The field and slot orders of
//! [`FeatureVector`] are the contract relied on by the recommendation
//! consumers and by [`FeatureVector::flatten`]; they must never change.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of scalar slots in a flattened [`FeatureVector`]:
/// 1 + 3 + 1 + 1 + 5 + 1 + 6.
pub const FLAT_LEN: usize = 18;

/// Read-only projection of a catalog exercise, as supplied by the storage
/// layer.
///
/// Fields are deliberately loosely typed: the encoder owns the mapping from
/// raw labels to slots, and malformed or missing values degrade to defaults
/// instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAttributes {
    /// Difficulty label, expected to be one of `beginner`/`medium`/`expert`.
    pub difficulty_level: String,
    /// Names of the linked muscle groups. May be empty, may contain
    /// duplicates or names outside the recognized set.
    pub muscle_groups: Vec<String>,
    /// Default active duration in seconds.
    pub duration_seconds: u32,
    /// Calories burned per minute; absent reads as 0.
    pub calories_per_minute: Option<f64>,
    /// Comma-separated equipment tokens; absent reads as the empty string.
    pub equipment: Option<String>,
    /// Category label; absent reads as `other`.
    pub category: Option<String>,
    /// Count of associated instructional steps.
    pub instruction_count: u32,
}

/// Fixed-length numeric encoding of an exercise.
///
/// Slot orders:
/// - `muscle_groups_vector`: `[core, upper_body, lower_body]`
/// - `equipment_requirements`: `[bodyweight, weights, bands, cardio, other]`
/// - `category_encoding`: `[strength, cardio, flexibility, balance,
///   endurance, other]` (strict one-hot)
///
/// Computed fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub difficulty_numeric: u8,
    pub muscle_groups_vector: [u8; 3],
    pub duration_normalized: f64,
    pub intensity_score: f64,
    pub equipment_requirements: [u8; 5],
    pub instruction_complexity: u32,
    pub category_encoding: [u8; 6],
}

impl FeatureVector {
    /// Flatten into a scalar sequence, visiting fields in declaration order
    /// and expanding vector-valued fields slot by slot.
    #[must_use]
    pub fn flatten(&self) -> SmallVec<[f64; FLAT_LEN]> {
        let mut flat = SmallVec::new();
        flat.push(f64::from(self.difficulty_numeric));
        flat.extend(self.muscle_groups_vector.iter().map(|&slot| f64::from(slot)));
        flat.push(self.duration_normalized);
        flat.push(self.intensity_score);
        flat.extend(
            self.equipment_requirements
                .iter()
                .map(|&slot| f64::from(slot)),
        );
        flat.push(f64::from(self.instruction_complexity));
        flat.extend(self.category_encoding.iter().map(|&slot| f64::from(slot)));
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_order_and_length() {
        let vector = FeatureVector {
            difficulty_numeric: 3,
            muscle_groups_vector: [1, 0, 0],
            duration_normalized: 0.5,
            intensity_score: 0.25,
            equipment_requirements: [0, 1, 0, 0, 1],
            instruction_complexity: 4,
            category_encoding: [0, 0, 0, 0, 0, 1],
        };

        let flat = vector.flatten();
        assert_eq!(flat.len(), FLAT_LEN);
        assert_eq!(
            flat.as_slice(),
            &[
                3.0, // difficulty
                1.0, 0.0, 0.0, // muscle groups
                0.5, // duration
                0.25, // intensity
                0.0, 1.0, 0.0, 0.0, 1.0, // equipment
                4.0, // instruction complexity
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, // category
            ]
        );
    }

    #[test]
    fn test_attributes_default_is_inert() {
        let attributes = ExerciseAttributes::default();
        assert!(attributes.muscle_groups.is_empty());
        assert_eq!(attributes.calories_per_minute, None);
        assert_eq!(attributes.equipment, None);
        assert_eq!(attributes.category, None);
    }
}
