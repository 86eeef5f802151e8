use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attempts kept in memory; totals keep counting past this.
pub const MAX_RETAINED_ATTEMPTS: usize = 500;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub question: String,
    pub answer: String,
    pub expected: String,
    pub correct: bool,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptHistory {
    records: VecDeque<AttemptRecord>,
    attempts: u64,
    correct: u64,
}

impl AttemptHistory {
    pub fn push(&mut self, record: AttemptRecord) {
        self.attempts += 1;
        if record.correct {
            self.correct += 1;
        }
        self.records.push_back(record);
        if self.records.len() > MAX_RETAINED_ATTEMPTS {
            self.records.pop_front();
        }
    }

    /// Up to `limit` most recent records, oldest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &AttemptRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip)
    }

    pub fn last(&self) -> Option<&AttemptRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
