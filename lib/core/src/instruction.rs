use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of instructional step. The declaration order is the display order
/// used when steps are listed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InstructionType {
    Setup,
    Execution,
    Breathing,
    Modification,
    CommonMistakes,
}

impl InstructionType {
    pub const ALL: [InstructionType; 5] = [
        InstructionType::Setup,
        InstructionType::Execution,
        InstructionType::Breathing,
        InstructionType::Modification,
        InstructionType::CommonMistakes,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InstructionType::Setup => "setup",
            InstructionType::Execution => "execution",
            InstructionType::Breathing => "breathing",
            InstructionType::Modification => "modification",
            InstructionType::CommonMistakes => "common_mistakes",
        }
    }
}

/// A single instructional step attached to an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "instruction_id")]
    pub id: u64,
    pub exercise_id: u64,
    pub instruction_type: InstructionType,
    pub instruction_text: String,
    pub step_order: Option<u32>,
    pub is_critical: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInstruction {
    pub instruction_type: InstructionType,
    pub instruction_text: String,
    #[serde(default)]
    pub step_order: Option<u32>,
    #[serde(default)]
    pub is_critical: bool,
}

impl NewInstruction {
    pub fn validate(&self) -> Result<()> {
        if self.instruction_text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "instruction_text must not be empty".into(),
            ));
        }
        if self.step_order == Some(0) {
            return Err(Error::InvalidInput("step_order must be at least 1".into()));
        }
        Ok(())
    }
}

/// Partial update for an instruction. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstructionPatch {
    pub instruction_type: Option<InstructionType>,
    pub instruction_text: Option<String>,
    pub step_order: Option<u32>,
    pub is_critical: Option<bool>,
}

impl InstructionPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(text) = &self.instruction_text {
            if text.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "instruction_text must not be empty".into(),
                ));
            }
        }
        if self.step_order == Some(0) {
            return Err(Error::InvalidInput("step_order must be at least 1".into()));
        }
        Ok(())
    }

    pub fn apply(&self, instruction: &mut Instruction) {
        if let Some(instruction_type) = self.instruction_type {
            instruction.instruction_type = instruction_type;
        }
        if let Some(text) = &self.instruction_text {
            instruction.instruction_text = text.clone();
        }
        if let Some(order) = self.step_order {
            instruction.step_order = Some(order);
        }
        if let Some(critical) = self.is_critical {
            instruction.is_critical = critical;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_type_order() {
        assert!(InstructionType::Setup < InstructionType::Execution);
        assert!(InstructionType::Execution < InstructionType::Breathing);
        assert!(InstructionType::Modification < InstructionType::CommonMistakes);
    }

    #[test]
    fn test_new_instruction_validation() {
        let valid = NewInstruction {
            instruction_type: InstructionType::Setup,
            instruction_text: "Lie on your back".to_string(),
            step_order: Some(1),
            is_critical: false,
        };
        assert!(valid.validate().is_ok());

        let invalid = NewInstruction {
            instruction_text: "  ".to_string(),
            ..valid.clone()
        };
        assert!(invalid.validate().is_err());

        let invalid = NewInstruction {
            step_order: Some(0),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }
}
