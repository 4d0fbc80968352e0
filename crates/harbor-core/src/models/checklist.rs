//! The discharge-planning checklist definition.
//!
//! The checklist is a fixed, ordered set of milestones shared by every
//! client. Each step carries a due-date offset from the admission date and
//! at most one prerequisite step, forming a single linear chain. The table
//! itself is static data; per-client completion state lives in
//! [`super::ClientPlan::planning_progress`] and is interpreted by the
//! [`crate::checklist`] engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier for one discharge-planning checklist step.
///
/// Variants are declared in chain order, and the serialized form is the
/// upstream document key (`extensionScheduled`, `emailSent`, ...).
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "camelCase")]
pub enum StepKey {
    /// Extension call scheduled with the family
    ExtensionScheduled,
    /// Extension email sent
    EmailSent,
    /// Aftercare coordination thread launched
    AftercareThreadLaunched,
    /// Initial placement options vetted
    InitialOptionsVetted,
    /// Family review session held
    FamilyReviewSession,
    /// Connecting emails sent to candidate programs
    ConnectingEmailsSent,
    /// Final program confirmed
    FinalProgramConfirmed,
    /// Intake date secured with the receiving program
    IntakeDateSecured,
    /// Warm handoff to the receiving program completed
    WarmHandoffCompleted,
    /// Kipu EMR record updated
    KipuUpdated,
}

impl StepKey {
    /// Document key for this step, as persisted in the progress map.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::ExtensionScheduled => "extensionScheduled",
            StepKey::EmailSent => "emailSent",
            StepKey::AftercareThreadLaunched => "aftercareThreadLaunched",
            StepKey::InitialOptionsVetted => "initialOptionsVetted",
            StepKey::FamilyReviewSession => "familyReviewSession",
            StepKey::ConnectingEmailsSent => "connectingEmailsSent",
            StepKey::FinalProgramConfirmed => "finalProgramConfirmed",
            StepKey::IntakeDateSecured => "intakeDateSecured",
            StepKey::WarmHandoffCompleted => "warmHandoffCompleted",
            StepKey::KipuUpdated => "kipuUpdated",
        }
    }

    /// The static definition for this step.
    pub fn definition(self) -> &'static StepDefinition {
        // Variants are declared in the same order as checklist_steps().
        &checklist_steps()[self as usize]
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        checklist_steps()
            .iter()
            .map(|def| def.key)
            .find(|key| key.as_str().to_lowercase() == normalized)
            .ok_or_else(|| format!("Invalid checklist step: {s}"))
    }
}

/// Informational urgency of a checklist step. Does not affect gating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepPriority {
    High,
    Medium,
}

/// Static definition of one checklist step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    /// Unique step identifier
    pub key: StepKey,
    /// Display label
    pub label: &'static str,
    /// Days after the admission date at which the step is due
    pub due_after_days: i32,
    /// Prerequisite step that must be complete before this one can be
    pub depends_on: Option<StepKey>,
    /// Whether the step needs attention at every weekly case review while
    /// incomplete
    pub requires_recurring_review: bool,
    /// Informational urgency
    pub priority: StepPriority,
}

/// The fixed discharge-planning checklist, in chain order.
pub fn checklist_steps() -> &'static [StepDefinition] {
    static STEPS: [StepDefinition; 10] = [
        StepDefinition {
            key: StepKey::ExtensionScheduled,
            label: "Extension Call Scheduled",
            due_after_days: 14,
            depends_on: None,
            requires_recurring_review: true,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::EmailSent,
            label: "Extension Email Sent",
            due_after_days: 15,
            depends_on: Some(StepKey::ExtensionScheduled),
            requires_recurring_review: true,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::AftercareThreadLaunched,
            label: "Aftercare Thread Launched",
            due_after_days: 16,
            depends_on: Some(StepKey::EmailSent),
            requires_recurring_review: true,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::InitialOptionsVetted,
            label: "Initial Options Vetted",
            due_after_days: 21,
            depends_on: Some(StepKey::AftercareThreadLaunched),
            requires_recurring_review: true,
            priority: StepPriority::Medium,
        },
        StepDefinition {
            key: StepKey::FamilyReviewSession,
            label: "Family Review Session",
            due_after_days: 28,
            depends_on: Some(StepKey::InitialOptionsVetted),
            requires_recurring_review: true,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::ConnectingEmailsSent,
            label: "Connecting Emails Sent",
            due_after_days: 30,
            depends_on: Some(StepKey::FamilyReviewSession),
            requires_recurring_review: false,
            priority: StepPriority::Medium,
        },
        StepDefinition {
            key: StepKey::FinalProgramConfirmed,
            label: "Final Program Confirmed",
            due_after_days: 35,
            depends_on: Some(StepKey::ConnectingEmailsSent),
            requires_recurring_review: true,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::IntakeDateSecured,
            label: "Intake Date Secured",
            due_after_days: 37,
            depends_on: Some(StepKey::FinalProgramConfirmed),
            requires_recurring_review: false,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::WarmHandoffCompleted,
            label: "Warm Handoff Completed",
            due_after_days: 42,
            depends_on: Some(StepKey::IntakeDateSecured),
            requires_recurring_review: false,
            priority: StepPriority::High,
        },
        StepDefinition {
            key: StepKey::KipuUpdated,
            label: "Kipu Updated",
            due_after_days: 43,
            depends_on: Some(StepKey::WarmHandoffCompleted),
            requires_recurring_review: false,
            priority: StepPriority::Medium,
        },
    ];
    &STEPS
}

/// Evaluated state of one checklist step for a client at a point in time.
///
/// Produced by [`crate::checklist::evaluate`], one record per step in
/// definition order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepState {
    /// Which step this record describes
    pub key: StepKey,
    /// The step has been marked complete
    pub completed: bool,
    /// The step's prerequisite is not yet complete
    pub blocked: bool,
    /// Past due and still actionable (never set for completed or blocked
    /// steps)
    pub overdue: bool,
    /// Due within the next few days (mutually exclusive with overdue)
    pub due_soon: bool,
    /// Review mode is on, the step requires recurring review, and it is not
    /// complete
    pub needs_recurring_attention: bool,
    /// Days until the due date; negative once past due
    pub days_left: i32,
}
