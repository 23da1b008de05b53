/// Duration-sensitive rating of the Special List
use crate::duration::DetectedDuration;
use crate::lexicon::RatingTier;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of the threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Applies to content up to this many minutes
    pub ceiling_minutes: u64,
    /// Occurrences tolerated before the tier rises to 15
    pub max_occurrences: usize,
}

/// Ascending table of duration ceilings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    rows: Vec<Threshold>,
}

impl ThresholdTable {
    pub fn new(rows: Vec<Threshold>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Threshold] {
        &self.rows
    }

    /// Rows must be non-empty with strictly increasing ceilings
    pub fn is_valid(&self) -> bool {
        !self.rows.is_empty()
            && self
                .rows
                .windows(2)
                .all(|pair| pair[0].ceiling_minutes < pair[1].ceiling_minutes)
    }

    /// Row governing content of `minutes` length; longer content uses the last row
    pub fn row_for(&self, minutes: u64) -> Option<&Threshold> {
        self.rows
            .iter()
            .find(|row| row.ceiling_minutes >= minutes)
            .or_else(|| self.rows.last())
    }

    /// Tier for `occurrences` within content of `minutes` length
    pub fn classify(&self, occurrences: usize, minutes: u64) -> RatingTier {
        match self.row_for(minutes) {
            Some(row) if occurrences > row.max_occurrences => RatingTier::Fifteen,
            _ => RatingTier::Twelve,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let rows = [(15, 1), (30, 2), (45, 3), (60, 4), (90, 5)]
            .into_iter()
            .map(|(ceiling_minutes, max_occurrences)| Threshold {
                ceiling_minutes,
                max_occurrences,
            })
            .collect();
        Self { rows }
    }
}

/// Tier for the Special List, withheld without a detected duration or any occurrence
pub fn classify_special(
    table: &ThresholdTable,
    total: usize,
    duration: Option<&DetectedDuration>,
) -> Option<RatingTier> {
    if total == 0 {
        return None;
    }
    let Some(duration) = duration else {
        debug!("No duration detected, special list tier withheld");
        return None;
    };

    let tier = table.classify(total, duration.total_minutes);
    debug!(
        "Special list: {} occurrences over {} minutes -> {}",
        total, duration.total_minutes, tier
    );
    Some(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content() {
        let table = ThresholdTable::default();
        assert_eq!(table.classify(1, 10), RatingTier::Twelve);
        assert_eq!(table.classify(2, 10), RatingTier::Fifteen);
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let table = ThresholdTable::default();
        assert_eq!(table.row_for(15).unwrap().max_occurrences, 1);
        assert_eq!(table.row_for(16).unwrap().max_occurrences, 2);
        assert_eq!(table.classify(4, 60), RatingTier::Twelve);
        assert_eq!(table.classify(5, 60), RatingTier::Fifteen);
    }

    #[test]
    fn test_beyond_last_ceiling_uses_last_row() {
        let table = ThresholdTable::default();
        assert_eq!(table.classify(6, 120), RatingTier::Fifteen);
        assert_eq!(table.classify(5, 120), RatingTier::Twelve);
    }

    #[test]
    fn test_withheld_without_duration() {
        let table = ThresholdTable::default();
        assert_eq!(classify_special(&table, 3, None), None);

        let duration = DetectedDuration::from_seconds(600);
        assert_eq!(classify_special(&table, 0, Some(&duration)), None);
        assert_eq!(classify_special(&table, 1, Some(&duration)), Some(RatingTier::Twelve));
    }

    #[test]
    fn test_table_validation() {
        assert!(ThresholdTable::default().is_valid());
        assert!(!ThresholdTable::new(Vec::new()).is_valid());

        let unordered = ThresholdTable::new(vec![
            Threshold { ceiling_minutes: 30, max_occurrences: 2 },
            Threshold { ceiling_minutes: 15, max_occurrences: 1 },
        ]);
        assert!(!unordered.is_valid());
    }
}
