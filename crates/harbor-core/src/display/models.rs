//! Display implementations for domain models.
//!
//! All output is markdown for rich terminal rendering. Formatting here is
//! clock-free: [`ClientPlan`]'s own Display shows the plan document as
//! stored, and the date-annotated checklist view lives in
//! [`super::workspace::Workspace`], which carries pre-evaluated step states.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::checklist;
use crate::models::{
    ClientPlan, ClientSummary, FieldKey, PlacementStatus, PlanStatus, StepState, Task,
    TaskPriority,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StepState {
    /// Status icon for checklist rendering.
    ///
    /// Completion and blocking outrank urgency: a completed step never
    /// shows its (stale) due information, and a blocked step shows what it
    /// is waiting for instead.
    pub fn icon(&self) -> &'static str {
        if self.completed {
            "✓"
        } else if self.blocked {
            "⊘"
        } else if self.overdue {
            "⚠"
        } else if self.needs_recurring_attention {
            "⚡"
        } else if self.due_soon {
            "◔"
        } else {
            "○"
        }
    }

    /// One-line annotation for the step ("overdue by 4 days", "waiting
    /// for: Extension Email Sent", ...).
    pub fn annotation(&self) -> String {
        if self.completed {
            return "completed".to_string();
        }
        if self.blocked {
            let waiting_on = self
                .key
                .definition()
                .depends_on
                .map(|dep| dep.definition().label)
                .unwrap_or("prerequisite");
            return format!("waiting for: {waiting_on}");
        }

        let due = if self.days_left < 0 {
            format!("overdue by {} days", -self.days_left)
        } else {
            format!("due in {} days", self.days_left)
        };

        if self.needs_recurring_attention {
            format!("{due} · weekly update needed")
        } else {
            due
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} {} — {}",
            self.icon(),
            self.key.definition().label,
            self.annotation()
        )
    }
}

impl ClientPlan {
    pub(crate) fn fmt_meta(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Admitted: {}", self.admission_date)?;
        if let Some(date) = self.estimated_discharge_date {
            writeln!(f, "- Estimated discharge: {date}")?;
        }
        writeln!(
            f,
            "- Checklist: {:.0}% complete",
            checklist::completion_percentage(&self.planning_progress)
        )?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.last_updated))?;
        Ok(())
    }

    pub(crate) fn fmt_shortlist(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n## Shortlist ({})", self.shortlist.len())?;
        writeln!(f)?;
        if self.shortlist.is_empty() {
            writeln!(f, "No programs shortlisted yet.")?;
        } else {
            for entry in &self.shortlist {
                writeln!(f, "- {} [{}]", entry.program_name, entry.status)?;
                if !entry.notes.is_empty() {
                    writeln!(f, "  - {}", entry.notes)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn fmt_tasks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return Ok(());
        }
        writeln!(f, "\n## Follow-up Tasks")?;
        writeln!(f)?;
        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        Ok(())
    }

    pub(crate) fn fmt_referent(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let referent = &self.referent;
        if referent == &Default::default() {
            return Ok(());
        }
        writeln!(f, "\n## Referent")?;
        writeln!(f)?;
        if let Some(name) = &referent.name {
            writeln!(f, "- Name: {name}")?;
        }
        if let Some(referent_type) = referent.referent_type {
            writeln!(f, "- Type: {}", referent_type.as_str())?;
        }
        if let Some(role) = referent.role {
            writeln!(f, "- Role: {}", role.as_str())?;
        }
        if let Some(date) = referent.last_contact_date {
            writeln!(f, "- Last contact: {date}")?;
        }
        if let Some(date) = referent.next_contact_date {
            writeln!(f, "- Next contact: {date}")?;
        }
        Ok(())
    }

    pub(crate) fn fmt_weekly(
        &self,
        f: &mut fmt::Formatter<'_>,
        stale: &[FieldKey],
    ) -> fmt::Result {
        writeln!(f, "\n## Weekly Updates")?;
        writeln!(f)?;
        for key in FieldKey::all() {
            let text = self
                .weekly_updates
                .get(&key)
                .map(|field| field.text.as_str())
                .filter(|text| !text.is_empty())
                .unwrap_or("—");
            let marker = if stale.contains(&key) && key.required() {
                " ⚠"
            } else {
                ""
            };
            writeln!(f, "- {}{marker}: {text}", key.label())?;
        }
        Ok(())
    }
}

impl fmt::Display for ClientPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        self.fmt_meta(f)?;
        self.fmt_shortlist(f)?;
        self.fmt_tasks(f)?;
        self.fmt_referent(f)?;
        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        writeln!(f, "- [{mark}] {} ({}, #{})", self.text, self.priority, self.id)
    }
}

impl fmt::Display for ClientSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({}/{})",
            self.name, self.id, self.completed_steps, self.total_steps
        )?;
        writeln!(f)?;
        writeln!(f, "- **Admitted**: {}", self.admission_date)?;
        if let Some(date) = self.estimated_discharge_date {
            writeln!(f, "- **Estimated discharge**: {date}")?;
        }
        writeln!(
            f,
            "- **Shortlist**: {} program(s){}",
            self.shortlist_count,
            if self.placement_confirmed {
                ", placement confirmed"
            } else {
                ""
            }
        )?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.last_updated))?;
        writeln!(f)?;
        Ok(())
    }
}
