use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Lowest and highest score a respondent may give.
pub const SCORE_RANGE: RangeInclusive<i64> = 30..=98;
pub const EXCELLENT_RANGE: RangeInclusive<i64> = 90..=98;
pub const GOOD_OR_BELOW_RANGE: RangeInclusive<i64> = 30..=89;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBucket {
    Excellent,
    GoodOrBelow,
}

impl ScoreBucket {
    /// Returns `None` for scores outside [`SCORE_RANGE`].
    pub fn classify(score: i64) -> Option<Self> {
        if EXCELLENT_RANGE.contains(&score) {
            Some(Self::Excellent)
        } else if GOOD_OR_BELOW_RANGE.contains(&score) {
            Some(Self::GoodOrBelow)
        } else {
            None
        }
    }
}

pub fn excellent_count(scores: &[i64]) -> usize {
    scores
        .iter()
        .filter(|&&s| ScoreBucket::classify(s) == Some(ScoreBucket::Excellent))
        .count()
}

pub fn good_or_below_count(scores: &[i64]) -> usize {
    scores
        .iter()
        .filter(|&&s| ScoreBucket::classify(s) == Some(ScoreBucket::GoodOrBelow))
        .count()
}

/// One respondent's accepted scores. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub responder_id: String,
    pub scores: Vec<i64>,
    /// ISO-8601. Kept as text so documents with offset-less timestamps still load.
    pub timestamp: String,
}

impl Submission {
    pub fn new(responder_id: impl Into<String>, scores: Vec<i64>) -> Self {
        Self {
            responder_id: responder_id.into(),
            scores,
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// Running bucket totals across every accepted submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub excellent: u64,
    pub good_or_below: u64,
}

impl Distribution {
    pub fn record(&mut self, scores: &[i64]) {
        for &score in scores {
            match ScoreBucket::classify(score) {
                Some(ScoreBucket::Excellent) => self.excellent += 1,
                Some(ScoreBucket::GoodOrBelow) => self.good_or_below += 1,
                None => {}
            }
        }
    }

    pub fn tally(results: &[Submission]) -> Self {
        let mut distribution = Self::default();
        for submission in results {
            distribution.record(&submission.scores);
        }
        distribution
    }

    pub fn total(&self) -> u64 {
        self.excellent + self.good_or_below
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub total_leaders: usize,
    pub max_excellent: usize,
    pub min_good_or_below: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_leaders: 6,
            max_excellent: 2,
            min_good_or_below: 4,
        }
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyStore {
    pub results: Vec<Submission>,
    pub distribution: Distribution,
    pub settings: Settings,
}

impl SurveyStore {
    /// Appends an already validated submission and bumps the counters.
    pub fn accept(&mut self, submission: Submission) {
        self.distribution.record(&submission.scores);
        self.results.push(submission);
    }

    pub fn is_consistent(&self) -> bool {
        Distribution::tally(&self.results) == self.distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_respects_bucket_edges() {
        assert_eq!(ScoreBucket::classify(29), None);
        assert_eq!(ScoreBucket::classify(30), Some(ScoreBucket::GoodOrBelow));
        assert_eq!(ScoreBucket::classify(89), Some(ScoreBucket::GoodOrBelow));
        assert_eq!(ScoreBucket::classify(90), Some(ScoreBucket::Excellent));
        assert_eq!(ScoreBucket::classify(98), Some(ScoreBucket::Excellent));
        assert_eq!(ScoreBucket::classify(99), None);
    }

    #[test]
    fn accept_keeps_distribution_in_step_with_results() {
        let mut store = SurveyStore::default();
        store.accept(Submission::new("E001", vec![95, 96, 40, 50, 60, 70]));
        assert_eq!(
            store.distribution,
            Distribution {
                excellent: 2,
                good_or_below: 4
            }
        );
        store.accept(Submission::new("E002", vec![91, 30, 31, 32, 33, 34]));
        assert_eq!(store.results.len(), 2);
        assert_eq!(store.distribution.total(), 12);
        assert!(store.is_consistent());
    }

    #[test]
    fn default_document_matches_persisted_layout() {
        let json = serde_json::to_value(SurveyStore::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "results": [],
                "distribution": { "excellent": 0, "good_or_below": 0 },
                "settings": { "total_leaders": 6, "max_excellent": 2, "min_good_or_below": 4 }
            })
        );
    }

    #[test]
    fn legacy_timestamps_without_offset_still_parse() {
        let raw = r#"{"responder_id":"E9","scores":[90,40,41,42,43,44],"timestamp":"2024-03-01T09:15:02.123456"}"#;
        let submission: Submission = serde_json::from_str(raw).unwrap();
        assert_eq!(submission.timestamp, "2024-03-01T09:15:02.123456");
    }
}
