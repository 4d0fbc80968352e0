//! Request types for mutating client plans.

use jiff::civil::Date;

use super::{PlanStatus, ProgressMap, Referent, ShortlistEntry, Task, WeeklyUpdates};

/// Partial change set applied to a client plan by
/// [`ClientPlan::apply`](super::ClientPlan::apply).
///
/// Each populated field replaces the corresponding top-level field wholesale;
/// sub-structures are full replacements, not deltas. The aggregate stamps
/// `last_updated` whenever a patch is applied, even an empty one.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub status: Option<PlanStatus>,
    pub estimated_discharge_date: Option<Date>,
    pub planning_progress: Option<ProgressMap>,
    pub shortlist: Option<Vec<ShortlistEntry>>,
    pub tasks: Option<Vec<Task>>,
    pub weekly_updates: Option<WeeklyUpdates>,
    pub referent: Option<Referent>,
}

impl PlanPatch {
    /// A patch that replaces only the checklist progress map.
    pub fn progress(progress: ProgressMap) -> Self {
        Self {
            planning_progress: Some(progress),
            ..Default::default()
        }
    }

    /// A patch that replaces only the shortlist.
    pub fn shortlist(shortlist: Vec<ShortlistEntry>) -> Self {
        Self {
            shortlist: Some(shortlist),
            ..Default::default()
        }
    }

    /// A patch that replaces only the task list.
    pub fn tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Some(tasks),
            ..Default::default()
        }
    }

    /// A patch that replaces only the weekly update fields.
    pub fn weekly_updates(weekly: WeeklyUpdates) -> Self {
        Self {
            weekly_updates: Some(weekly),
            ..Default::default()
        }
    }
}
