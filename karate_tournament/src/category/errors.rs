use thiserror::Error;

/// Category errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("no category at index {0}")]
    NotFound(usize),

    #[error("cannot merge a category with itself")]
    SameCategory,

    #[error("cannot merge {merged} into {target}: disciplines differ")]
    DisciplineMismatch { target: String, merged: String },

    #[error("category {0} has already started")]
    AlreadyStarted(String),

    #[error("invalid age range: {min} > {max}")]
    InvalidAgeRange { min: u8, max: u8 },

    #[error("category {0} does not take teams")]
    NotTeamCategory(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;
