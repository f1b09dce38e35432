use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Exercise not found: {0}")]
    ExerciseNotFound(u64),

    #[error("Workout not found: {0}")]
    WorkoutNotFound(u64),

    #[error("Instruction not found: {0}")]
    InstructionNotFound(u64),

    #[error("Video not found: {0}")]
    VideoNotFound(u64),

    #[error("Muscle group not found: {0}")]
    MuscleGroupNotFound(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
