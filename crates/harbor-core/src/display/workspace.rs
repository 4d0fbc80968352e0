//! Composite workspace and review views.
//!
//! These wrappers carry a plan together with its pre-evaluated checklist
//! states and weekly staleness flags, so rendering stays clock-free.

use std::fmt;

use crate::models::{ClientPlan, FieldKey, StepState};

/// A client's full discharge-planning workspace.
///
/// Built by [`Coordinator::client_workspace`]
/// (crate::coordinator::Coordinator::client_workspace): the plan document
/// plus the checklist evaluated against today, and — in review mode — the
/// weekly update fields currently stale.
pub struct Workspace {
    /// The plan document
    pub plan: ClientPlan,
    /// Evaluated checklist states, in definition order
    pub states: Vec<StepState>,
    /// Weekly update fields needing attention
    pub stale_fields: Vec<FieldKey>,
    /// Whether review mode was requested
    pub review: bool,
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.plan.id, self.plan.name)?;
        if self.review {
            writeln!(f)?;
            writeln!(f, "**Review mode**")?;
        }
        writeln!(f)?;
        self.plan.fmt_meta(f)?;

        writeln!(f, "\n## Planning Checklist")?;
        writeln!(f)?;
        for state in &self.states {
            write!(f, "{state}")?;
        }

        self.plan.fmt_shortlist(f)?;
        self.plan.fmt_tasks(f)?;

        if self.review {
            self.plan.fmt_weekly(f, &self.stale_fields)?;
        }

        self.plan.fmt_referent(f)?;
        Ok(())
    }
}

/// Weekly case-review report: what needs attention right now.
pub struct ReviewReport {
    /// The plan document
    pub plan: ClientPlan,
    /// Weekly update fields that are unset or stale
    pub stale_fields: Vec<FieldKey>,
    /// Incomplete checklist steps that require recurring review
    pub attention: Vec<StepState>,
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Weekly Review — {}", self.plan.name)?;
        writeln!(f)?;

        writeln!(f, "## Checklist items needing attention")?;
        writeln!(f)?;
        if self.attention.is_empty() {
            writeln!(f, "All recurring-review steps are complete.")?;
        } else {
            for state in &self.attention {
                write!(f, "{state}")?;
            }
        }

        writeln!(f, "\n## Weekly update fields")?;
        writeln!(f)?;
        let stale_required: Vec<&FieldKey> = self
            .stale_fields
            .iter()
            .filter(|key| key.required())
            .collect();
        if stale_required.is_empty() {
            writeln!(f, "All required fields updated within the last 7 days.")?;
        } else {
            for key in &stale_required {
                writeln!(f, "- {} needs an update", key.label())?;
            }
        }
        if self.stale_fields.contains(&FieldKey::FamilyCommunication) {
            writeln!(f, "- {} (optional) has no recent entry", FieldKey::FamilyCommunication.label())?;
        }

        Ok(())
    }
}
