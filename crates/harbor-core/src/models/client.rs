//! Client plan aggregate definition.

use std::collections::BTreeMap;

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{
    PlanPatch, PlanStatus, Referent, ShortlistEntry, StepKey, Task, WeeklyUpdates,
};

/// Per-client checklist completion state, keyed by step.
///
/// Missing keys mean "not complete". Because [`StepKey`] is a closed enum,
/// unknown keys can never enter the map.
pub type ProgressMap = BTreeMap<StepKey, bool>;

/// The aggregate root for one client's discharge plan.
///
/// Owns the checklist progress, the program shortlist, follow-up tasks, the
/// referent contact record and the weekly review updates. All mutation goes
/// through [`ClientPlan::apply`] so that `last_updated` is stamped on every
/// change; persistence overwrites the whole document, guarded by `revision`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientPlan {
    /// Unique identifier, assigned by the store and immutable afterwards
    pub id: u64,

    /// Client display name
    pub name: String,

    /// Plan status (active or discharged)
    #[serde(default)]
    pub status: PlanStatus,

    /// Admission date; anchors all checklist due-date computation
    pub admission_date: Date,

    /// Estimated discharge date, revised as planning progresses
    pub estimated_discharge_date: Option<Date>,

    /// Checklist completion state
    #[serde(default)]
    pub planning_progress: ProgressMap,

    /// Candidate placements under consideration, in insertion order
    #[serde(default)]
    pub shortlist: Vec<ShortlistEntry>,

    /// Free-form follow-up tasks
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Weekly case-review update fields
    #[serde(default)]
    pub weekly_updates: WeeklyUpdates,

    /// Referent contact record
    #[serde(default)]
    pub referent: Referent,

    /// Optimistic-concurrency stamp; bumped by the store on every save
    #[serde(default)]
    pub revision: u64,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last mutation (UTC)
    pub last_updated: Timestamp,
}

impl ClientPlan {
    /// Shallow-merge a partial change set into the plan.
    ///
    /// Changed top-level fields are replaced wholesale (callers supply the
    /// complete intended sub-structure, not a delta) and `last_updated` is
    /// always stamped, whether or not any field changed. No cross-field
    /// validation happens here; the checklist and shortlist engines enforce
    /// their own invariants before a patch is built.
    pub fn apply(mut self, patch: PlanPatch, now: Timestamp) -> ClientPlan {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = patch.estimated_discharge_date {
            self.estimated_discharge_date = Some(date);
        }
        if let Some(progress) = patch.planning_progress {
            self.planning_progress = progress;
        }
        if let Some(shortlist) = patch.shortlist {
            self.shortlist = shortlist;
        }
        if let Some(tasks) = patch.tasks {
            self.tasks = tasks;
        }
        if let Some(weekly) = patch.weekly_updates {
            self.weekly_updates = weekly;
        }
        if let Some(referent) = patch.referent {
            self.referent = referent;
        }
        self.last_updated = now;
        self
    }

    /// Next free task identifier within this plan.
    pub fn next_task_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }
}
