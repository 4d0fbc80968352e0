//! Client summary types for list views.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ClientPlan, PlacementStatus, PlanStatus};
use crate::checklist;

/// Summary information about a client plan with checklist statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    /// Client ID
    pub id: u64,
    /// Client display name
    pub name: String,
    /// Plan status
    pub status: PlanStatus,
    /// Admission date
    pub admission_date: Date,
    /// Estimated discharge date, if set
    pub estimated_discharge_date: Option<Date>,
    /// Completed checklist steps
    pub completed_steps: u32,
    /// Total checklist steps (fixed)
    pub total_steps: u32,
    /// Checklist completion percentage over the fixed total
    pub completion_percentage: f64,
    /// Number of shortlisted programs
    pub shortlist_count: u32,
    /// Whether any shortlisted placement is confirmed
    pub placement_confirmed: bool,
    /// Last mutation timestamp
    pub last_updated: Timestamp,
}

impl From<&ClientPlan> for ClientSummary {
    fn from(plan: &ClientPlan) -> Self {
        let completed_steps = plan
            .planning_progress
            .values()
            .filter(|done| **done)
            .count() as u32;

        Self {
            id: plan.id,
            name: plan.name.clone(),
            status: plan.status,
            admission_date: plan.admission_date,
            estimated_discharge_date: plan.estimated_discharge_date,
            completed_steps,
            total_steps: checklist::total_steps() as u32,
            completion_percentage: checklist::completion_percentage(&plan.planning_progress),
            shortlist_count: plan.shortlist.len() as u32,
            placement_confirmed: plan
                .shortlist
                .iter()
                .any(|entry| entry.status == PlacementStatus::Confirmed),
            last_updated: plan.last_updated,
        }
    }
}
