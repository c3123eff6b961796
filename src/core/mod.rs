pub mod error;
pub mod quota;
pub mod types;

pub use error::{Result, SurveyError, ValidationError};
pub use quota::validate_submission;
pub use types::{
    Distribution, ScoreBucket, Settings, Submission, SurveyStore, excellent_count,
    good_or_below_count,
};
