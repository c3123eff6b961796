//! Shape, range and per-submission quota checks.
//!
//! Checks run in a fixed order and the first failure is reported:
//! identifier, score count, score range, excellent quota, good-or-below quota.

use super::error::ValidationError;
use super::types::{SCORE_RANGE, Settings, excellent_count, good_or_below_count};

pub fn validate_submission(
    responder_id: Option<&str>,
    scores: &[i64],
    settings: &Settings,
) -> Result<(), ValidationError> {
    if responder_id.is_none_or(str::is_empty) {
        return Err(ValidationError::MissingIdentifier);
    }

    if scores.len() != settings.total_leaders {
        return Err(ValidationError::WrongScoreCount {
            expected: settings.total_leaders,
            actual: scores.len(),
        });
    }

    if let Some(&score) = scores.iter().find(|&&s| !SCORE_RANGE.contains(&s)) {
        return Err(ValidationError::ScoreOutOfRange { score });
    }

    let excellent = excellent_count(scores);
    if excellent > settings.max_excellent {
        return Err(ValidationError::TooManyExcellent {
            count: excellent,
            max: settings.max_excellent,
        });
    }

    let good_or_below = good_or_below_count(scores);
    if good_or_below < settings.min_good_or_below {
        return Err(ValidationError::TooFewGoodOrBelow {
            count: good_or_below,
            min: settings.min_good_or_below,
        });
    }

    Ok(())
}
