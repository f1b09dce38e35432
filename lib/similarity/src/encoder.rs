//! Attribute encoders
//!
//! Maps a raw [`ExerciseAttributes`] projection onto the fixed slots of a
//! [`FeatureVector`]. Every mapping here is frozen: the recommendation
//! consumers were trained against these exact slot assignments, including
//! the asymmetries between the encoders (muscle groups ignore unknown names
//! without a fallback slot, equipment classifies unknown tokens as `other`,
//! category is a strict one-hot with an `other` fallback).

use crate::features::{ExerciseAttributes, FeatureVector};

/// Slot order of `muscle_groups_vector`.
const MUSCLE_GROUP_SLOTS: [&str; 3] = ["core", "upper_body", "lower_body"];

/// Slot order of `category_encoding`. The final entry doubles as the
/// fallback for unmatched labels.
const CATEGORY_SLOTS: [&str; 6] = [
    "strength",
    "cardio",
    "flexibility",
    "balance",
    "endurance",
    "other",
];

/// Equipment categories in slot order, each with the tokens it recognizes.
/// Tested first to last; the first matching category wins for a token.
const EQUIPMENT_CATEGORIES: [(&str, &[&str]); 4] = [
    ("bodyweight", &["none", "bodyweight", ""]),
    ("weights", &["dumbbells", "barbells", "kettlebells", "weights"]),
    ("bands", &["resistance bands", "bands", "elastic"]),
    ("cardio", &["treadmill", "bike", "elliptical"]),
];

const OTHER_EQUIPMENT_SLOT: usize = 4;

/// Encode an attribute projection into a feature vector.
///
/// Pure and infallible: malformed fields degrade to the documented
/// defaults.
#[must_use]
pub fn encode(attributes: &ExerciseAttributes) -> FeatureVector {
    FeatureVector {
        difficulty_numeric: difficulty_numeric(&attributes.difficulty_level),
        muscle_groups_vector: encode_muscle_groups(&attributes.muscle_groups),
        duration_normalized: f64::from(attributes.duration_seconds) / 120.0,
        intensity_score: attributes.calories_per_minute.unwrap_or(0.0) / 20.0,
        equipment_requirements: encode_equipment(attributes.equipment.as_deref().unwrap_or("")),
        instruction_complexity: attributes.instruction_count,
        category_encoding: encode_category(attributes.category.as_deref()),
    }
}

/// Ordinal difficulty: beginner=1, medium=2, expert=3. Any other label,
/// including case variants, falls back to 1.
#[must_use]
pub fn difficulty_numeric(label: &str) -> u8 {
    match label {
        "beginner" => 1,
        "medium" => 2,
        "expert" => 3,
        _ => 1,
    }
}

/// Binary muscle-group slots in the order `[core, upper_body, lower_body]`.
///
/// Names outside the recognized set are ignored; duplicates are idempotent.
#[must_use]
pub fn encode_muscle_groups(names: &[String]) -> [u8; 3] {
    let mut slots = [0u8; 3];
    for name in names {
        if let Some(index) = MUSCLE_GROUP_SLOTS
            .iter()
            .position(|slot| *slot == name.as_str())
        {
            slots[index] = 1;
        }
    }
    slots
}

/// Binary equipment slots in the order
/// `[bodyweight, weights, bands, cardio, other]`.
///
/// The input is split on commas, trimmed, lower-cased, and empty tokens are
/// dropped. An input with no tokens at all reads as a bodyweight exercise.
#[must_use]
pub fn encode_equipment(equipment: &str) -> [u8; 5] {
    let mut slots = [0u8; 5];
    let tokens: Vec<String> = equipment
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        slots[0] = 1;
        return slots;
    }

    for token in &tokens {
        match EQUIPMENT_CATEGORIES
            .iter()
            .position(|(_, keywords)| keywords.contains(&token.as_str()))
        {
            Some(index) => slots[index] = 1,
            None => slots[OTHER_EQUIPMENT_SLOT] = 1,
        }
    }
    slots
}

/// One-hot category slots in the order
/// `[strength, cardio, flexibility, balance, endurance, other]`.
///
/// The label is lower-cased before matching; absent or unmatched labels set
/// the `other` slot. Exactly one slot is always set.
#[must_use]
pub fn encode_category(category: Option<&str>) -> [u8; 6] {
    let mut slots = [0u8; 6];
    let label = category.unwrap_or("other").to_lowercase();
    let index = CATEGORY_SLOTS
        .iter()
        .position(|slot| *slot == label)
        .unwrap_or(CATEGORY_SLOTS.len() - 1);
    slots[index] = 1;
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_difficulty_mapping() {
        assert_eq!(difficulty_numeric("beginner"), 1);
        assert_eq!(difficulty_numeric("medium"), 2);
        assert_eq!(difficulty_numeric("expert"), 3);
    }

    #[test]
    fn test_difficulty_fallback() {
        assert_eq!(difficulty_numeric(""), 1);
        assert_eq!(difficulty_numeric("advanced"), 1);
        assert_eq!(difficulty_numeric("Expert"), 1);
        assert_eq!(difficulty_numeric("intermediate"), 1);
    }

    #[test]
    fn test_muscle_groups_basic() {
        assert_eq!(encode_muscle_groups(&strings(&["core", "upper_body"])), [1, 1, 0]);
        assert_eq!(encode_muscle_groups(&strings(&["lower_body"])), [0, 0, 1]);
    }

    #[test]
    fn test_muscle_groups_empty_and_unrecognized() {
        assert_eq!(encode_muscle_groups(&[]), [0, 0, 0]);
        assert_eq!(encode_muscle_groups(&strings(&["legs"])), [0, 0, 0]);
        assert_eq!(encode_muscle_groups(&strings(&["Core"])), [0, 0, 0]);
    }

    #[test]
    fn test_muscle_groups_duplicates_idempotent() {
        assert_eq!(
            encode_muscle_groups(&strings(&["core", "core", "core"])),
            [1, 0, 0]
        );
    }

    #[test]
    fn test_equipment_empty_reads_as_bodyweight() {
        assert_eq!(encode_equipment(""), [1, 0, 0, 0, 0]);
        assert_eq!(encode_equipment("  , , "), [1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_equipment_keyword_categories() {
        assert_eq!(encode_equipment("none"), [1, 0, 0, 0, 0]);
        assert_eq!(encode_equipment("dumbbells"), [0, 1, 0, 0, 0]);
        assert_eq!(encode_equipment("resistance bands"), [0, 0, 1, 0, 0]);
        assert_eq!(encode_equipment("treadmill"), [0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_equipment_multi_membership() {
        assert_eq!(
            encode_equipment("dumbbells, resistance bands"),
            [0, 1, 1, 0, 0]
        );
        assert_eq!(
            encode_equipment("Bodyweight, Treadmill, yoga mat"),
            [1, 0, 0, 1, 1]
        );
    }

    #[test]
    fn test_equipment_unknown_token_sets_other() {
        assert_eq!(encode_equipment("yoga mat"), [0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_equipment_never_all_zero() {
        for input in ["", "none", "yoga mat", "dumbbells, pull-up bar", " , "] {
            assert_ne!(encode_equipment(input), [0, 0, 0, 0, 0], "input: {input:?}");
        }
    }

    #[test]
    fn test_category_one_hot() {
        assert_eq!(encode_category(Some("strength")), [1, 0, 0, 0, 0, 0]);
        assert_eq!(encode_category(Some("Strength")), [1, 0, 0, 0, 0, 0]);
        assert_eq!(encode_category(Some("endurance")), [0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_category_fallback_to_other() {
        assert_eq!(encode_category(Some("unknown")), [0, 0, 0, 0, 0, 1]);
        assert_eq!(encode_category(None), [0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_category_exactly_one_slot_set() {
        for label in [None, Some("strength"), Some("CARDIO"), Some("hiit"), Some("")] {
            let slots = encode_category(label);
            assert_eq!(slots.iter().map(|&slot| u32::from(slot)).sum::<u32>(), 1);
        }
    }

    #[test]
    fn test_encode_end_to_end() {
        let attributes = ExerciseAttributes {
            difficulty_level: "expert".to_string(),
            muscle_groups: strings(&["core"]),
            duration_seconds: 60,
            calories_per_minute: Some(10.0),
            equipment: Some(String::new()),
            category: Some("strength".to_string()),
            instruction_count: 3,
        };

        let vector = encode(&attributes);
        assert_eq!(vector.difficulty_numeric, 3);
        assert_eq!(vector.muscle_groups_vector, [1, 0, 0]);
        assert_eq!(vector.duration_normalized, 0.5);
        assert_eq!(vector.intensity_score, 0.5);
        assert_eq!(vector.equipment_requirements, [1, 0, 0, 0, 0]);
        assert_eq!(vector.instruction_complexity, 3);
        assert_eq!(vector.category_encoding, [1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_defaults_for_missing_fields() {
        let attributes = ExerciseAttributes {
            difficulty_level: "medium".to_string(),
            muscle_groups: Vec::new(),
            duration_seconds: 240,
            calories_per_minute: None,
            equipment: None,
            category: None,
            instruction_count: 0,
        };

        let vector = encode(&attributes);
        assert_eq!(vector.intensity_score, 0.0);
        // durations beyond the normalization window are left unclamped
        assert_eq!(vector.duration_normalized, 2.0);
        assert_eq!(vector.equipment_requirements, [1, 0, 0, 0, 0]);
        assert_eq!(vector.category_encoding, [0, 0, 0, 0, 0, 1]);
    }
}
