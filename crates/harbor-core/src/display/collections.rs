//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers give collections a Display implementation with graceful
//! empty-collection handling, keeping list formatting out of the interface
//! layers.

use std::{fmt, ops::Index};

use crate::models::{ClientSummary, ShortlistEntry, StepState};

/// Newtype wrapper for displaying collections of client summaries.
pub struct ClientSummaries(pub Vec<ClientSummary>);

impl ClientSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of client summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the client summary at the given index.
    pub fn get(&self, index: usize) -> Option<&ClientSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the client summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, ClientSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ClientSummaries {
    type Output = ClientSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for ClientSummaries {
    type Item = ClientSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClientSummaries {
    type Item = &'a ClientSummary;
    type IntoIter = std::slice::Iter<'a, ClientSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ClientSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No clients found.")
        } else {
            for client in &self.0 {
                write!(f, "{client}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying an evaluated checklist.
///
/// Renders one annotated line per step in definition order, using the
/// [`StepState`] Display format.
pub struct StepStates(pub Vec<StepState>);

impl StepStates {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of step states in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the step state at the given index.
    pub fn get(&self, index: usize) -> Option<&StepState> {
        self.0.get(index)
    }

    /// Get an iterator over the step states.
    pub fn iter(&self) -> std::slice::Iter<'_, StepState> {
        self.0.iter()
    }
}

impl Index<usize> for StepStates {
    type Output = StepState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for StepStates {
    type Item = StepState;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StepStates {
    type Item = &'a StepState;
    type IntoIter = std::slice::Iter<'a, StepState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for StepStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No checklist steps found.")
        } else {
            for state in &self.0 {
                write!(f, "{state}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a client's shortlist on its own.
pub struct ShortlistEntries(pub Vec<ShortlistEntry>);

impl ShortlistEntries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of entries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ShortlistEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No programs shortlisted yet.")
        } else {
            for entry in &self.0 {
                writeln!(f, "- {} [{}] ({})", entry.program_name, entry.status, entry.program_id)?;
                if !entry.notes.is_empty() {
                    writeln!(f, "  - {}", entry.notes)?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::Timestamp;

    use super::*;
    use crate::models::{PlacementStatus, PlanStatus, StepKey};

    fn create_test_summary() -> ClientSummary {
        ClientSummary {
            id: 1,
            name: "Jordan P.".to_string(),
            status: PlanStatus::Active,
            admission_date: date(2025, 3, 1),
            estimated_discharge_date: Some(date(2025, 4, 15)),
            completed_steps: 2,
            total_steps: 10,
            completion_percentage: 20.0,
            shortlist_count: 3,
            placement_confirmed: false,
            last_updated: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn client_summaries_display() {
        let summaries = ClientSummaries(vec![create_test_summary()]);
        let output = format!("{summaries}");
        assert!(output.contains("Jordan P."));
        assert!(output.contains("ID: 1"));
        assert!(output.contains("(2/10)"));

        let empty = ClientSummaries(vec![]);
        assert_eq!(format!("{empty}"), "No clients found.\n");
    }

    #[test]
    fn step_states_display_annotations() {
        let states = StepStates(vec![
            StepState {
                key: StepKey::ExtensionScheduled,
                completed: false,
                blocked: false,
                overdue: true,
                due_soon: false,
                needs_recurring_attention: false,
                days_left: -4,
            },
            StepState {
                key: StepKey::EmailSent,
                completed: false,
                blocked: true,
                overdue: false,
                due_soon: false,
                needs_recurring_attention: false,
                days_left: -3,
            },
        ]);

        let output = format!("{states}");
        assert!(output.contains("⚠ Extension Call Scheduled — overdue by 4 days"));
        assert!(output.contains("⊘ Extension Email Sent — waiting for: Extension Call Scheduled"));
    }

    #[test]
    fn shortlist_entries_display() {
        let entries = ShortlistEntries(vec![ShortlistEntry {
            program_id: "p1".to_string(),
            program_name: "Cedar Ridge - Wilderness".to_string(),
            status: PlacementStatus::Waitlisted,
            notes: "intake call Tuesday".to_string(),
        }]);
        let output = format!("{entries}");
        assert!(output.contains("Cedar Ridge - Wilderness [Waitlisted] (p1)"));
        assert!(output.contains("intake call Tuesday"));

        let empty = ShortlistEntries(vec![]);
        assert_eq!(format!("{empty}"), "No programs shortlisted yet.\n");
    }
}
