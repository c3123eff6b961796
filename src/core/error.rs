use thiserror::Error;

/// Reason a submission was refused by the quota engine.
///
/// The `Display` text is the reason reported back to the respondent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing identifier")]
    MissingIdentifier,

    #[error("wrong number of scores")]
    WrongScoreCount { expected: usize, actual: usize },

    #[error("score out of range")]
    ScoreOutOfRange { score: i64 },

    #[error("too many excellent ratings")]
    TooManyExcellent { count: usize, max: usize },

    #[error("too few good-or-below ratings")]
    TooFewGoodOrBelow { count: usize, min: usize },
}

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl SurveyError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;

impl<T> From<std::sync::PoisonError<T>> for SurveyError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Storage(format!("store lock poisoned: {}", err))
    }
}

impl From<tokio::task::JoinError> for SurveyError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Storage(format!("store task failed: {}", err))
    }
}
