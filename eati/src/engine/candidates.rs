// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashSet;

/// The candidates for one session of the picker, loaded once from the sheet.
///
/// The list of labels is fixed after load. What changes during the session is the
/// exclusion set, which is keyed by candidate **position** rather than label, so two
/// restaurants that share a name can still be toggled independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateRoster {
    labels: Vec<String>,
    excluded: HashSet<usize>,
}

impl CandidateRoster {
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            excluded: HashSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.labels.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    #[must_use]
    pub fn labels(&self) -> &[String] { self.labels.as_slice() }

    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn is_excluded(&self, index: usize) -> bool { self.excluded.contains(&index) }

    /// Include or exclude the candidate at `index`. Out of range positions are
    /// ignored, since there is nothing sensible to toggle.
    pub fn toggle(&mut self, index: usize, included: bool) {
        if index >= self.labels.len() {
            return;
        }
        if included {
            self.excluded.remove(&index);
        } else {
            self.excluded.insert(index);
        }
    }

    /// The candidates that are still in play, in sheet order, with their positions.
    pub fn active(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.excluded.contains(index))
            .map(|(index, label)| (index, label.as_str()))
    }

    #[must_use]
    pub fn active_count(&self) -> usize { self.active().count() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    fn sample_roster() -> CandidateRoster {
        CandidateRoster::new(vec![
            "Taqueria".to_string(),
            "Pho Garden".to_string(),
            "Burger Shack".to_string(),
        ])
    }

    #[test]
    fn toggle_excludes_and_reincludes_by_position() {
        let mut roster = sample_roster();
        assert_eq2!(roster.active_count(), 3);

        roster.toggle(1, false);
        assert!(roster.is_excluded(1));
        assert_eq2!(roster.active_count(), 2);
        assert_eq2!(
            roster.active().map(|(index, _)| index).collect::<Vec<_>>(),
            vec![0, 2]
        );

        roster.toggle(1, true);
        assert!(!roster.is_excluded(1));
        assert_eq2!(roster.active_count(), 3);
    }

    #[test]
    fn toggle_is_idempotent() {
        let mut roster = sample_roster();
        roster.toggle(0, false);
        roster.toggle(0, false);
        assert_eq2!(roster.active_count(), 2);
        roster.toggle(0, true);
        roster.toggle(0, true);
        assert_eq2!(roster.active_count(), 3);
    }

    #[test]
    fn toggle_out_of_range_is_ignored() {
        let mut roster = sample_roster();
        roster.toggle(99, false);
        assert_eq2!(roster, sample_roster());
    }

    #[test]
    fn duplicate_labels_toggle_independently() {
        let mut roster = CandidateRoster::new(vec![
            "Taqueria".to_string(),
            "Taqueria".to_string(),
        ]);
        roster.toggle(0, false);
        assert!(roster.is_excluded(0));
        assert!(!roster.is_excluded(1));
        assert_eq2!(
            roster.active().collect::<Vec<_>>(),
            vec![(1, "Taqueria")]
        );
    }

    #[test]
    fn active_preserves_sheet_order() {
        let mut roster = sample_roster();
        roster.toggle(0, false);
        assert_eq2!(
            roster.active().map(|(_, label)| label).collect::<Vec<_>>(),
            vec!["Pho Garden", "Burger Shack"]
        );
    }
}
