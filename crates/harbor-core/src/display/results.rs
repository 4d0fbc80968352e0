//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::checklist;
use crate::models::{ClientPlan, StepKey};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<ClientPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Admitted client with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// with a list of the changes made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<ClientPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated client with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of toggling a checklist step.
#[derive(Debug)]
pub struct StepToggleResult {
    /// The saved plan after the toggle
    pub plan: ClientPlan,
    /// Which step was toggled
    pub step: StepKey,
    /// The step's new completion state
    pub completed: bool,
}

impl fmt::Display for StepToggleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.step.definition().label;
        if self.completed {
            writeln!(f, "Marked '{label}' complete.")?;
        } else {
            writeln!(f, "Marked '{label}' incomplete.")?;
        }
        writeln!(
            f,
            "Checklist is now {:.0}% complete.",
            checklist::completion_percentage(&self.plan.planning_progress)
        )
    }
}

/// Outcome of adding candidate programs to a shortlist.
///
/// Carries how many of the requested programs were actually appended so the
/// caller can report duplicates ("2 already on shortlist").
pub struct ShortlistAddResult {
    /// The saved plan after the add
    pub plan: ClientPlan,
    /// How many programs the caller asked to add
    pub requested: usize,
    /// How many were actually appended (the rest were already shortlisted)
    pub added: usize,
}

impl ShortlistAddResult {
    /// Requested programs that were already on the shortlist.
    pub fn skipped(&self) -> usize {
        self.requested - self.added
    }
}

impl fmt::Display for ShortlistAddResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.added == 0 {
            writeln!(f, "Selected programs are already on the shortlist.")?;
        } else if self.skipped() > 0 {
            writeln!(
                f,
                "{} program(s) added to shortlist; {} already on shortlist.",
                self.added,
                self.skipped()
            )?;
        } else {
            writeln!(f, "{} program(s) added to shortlist.", self.added)?;
        }

        writeln!(f)?;
        writeln!(f, "Shortlist ({}):", self.plan.shortlist.len())?;
        for entry in &self.plan.shortlist {
            writeln!(f, "- {} [{}]", entry.program_name, entry.status)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jiff::civil::date;
    use jiff::Timestamp;

    use super::*;
    use crate::models::{PlanStatus, ShortlistEntry};

    fn test_plan() -> ClientPlan {
        ClientPlan {
            id: 7,
            name: "Jordan P.".to_string(),
            status: PlanStatus::Active,
            admission_date: date(2025, 3, 1),
            estimated_discharge_date: None,
            planning_progress: BTreeMap::new(),
            shortlist: vec![ShortlistEntry {
                program_id: "p1".to_string(),
                program_name: "Cedar Ridge - Wilderness".to_string(),
                status: Default::default(),
                notes: String::new(),
            }],
            tasks: Vec::new(),
            weekly_updates: BTreeMap::new(),
            referent: Default::default(),
            revision: 0,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            last_updated: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn create_result_display() {
        let output = format!("{}", CreateResult::new(test_plan()));
        assert!(output.contains("Admitted client with ID: 7"));
        assert!(output.contains("Jordan P."));
    }

    #[test]
    fn shortlist_add_result_reports_duplicates() {
        let result = ShortlistAddResult {
            plan: test_plan(),
            requested: 3,
            added: 1,
        };
        let output = format!("{result}");
        assert!(output.contains("1 program(s) added to shortlist; 2 already on shortlist."));

        let none_added = ShortlistAddResult {
            plan: test_plan(),
            requested: 1,
            added: 0,
        };
        let output = format!("{none_added}");
        assert!(output.contains("already on the shortlist"));
    }

    #[test]
    fn step_toggle_result_display() {
        let result = StepToggleResult {
            plan: test_plan(),
            step: crate::models::StepKey::ExtensionScheduled,
            completed: true,
        };
        let output = format!("{result}");
        assert!(output.contains("Marked 'Extension Call Scheduled' complete."));
        assert!(output.contains("0% complete"));
    }
}
