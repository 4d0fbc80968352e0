//! Checklist, weekly-update, task and referent handler operations.

use jiff::{Timestamp, Zoned};
use log::debug;

use super::Coordinator;
use crate::display::{ReviewReport, StepStates, StepToggleResult};
use crate::error::{CoordinatorError, Result};
use crate::models::{ClientPlan, PlanPatch, Task};
use crate::params::{
    AddTask, ChecklistStatus, Id, SetReferent, TaskRef, ToggleStep, WriteWeeklyUpdate,
};
use crate::{checklist, weekly};

impl Coordinator {
    /// Handle evaluating a client's checklist.
    ///
    /// Returns one state record per step in definition order, evaluated
    /// against today's date. Returns None if the client doesn't exist.
    pub async fn checklist_status(&self, params: &ChecklistStatus) -> Result<Option<StepStates>> {
        let Some(plan) = self.get_client(&Id { id: params.client_id }).await? else {
            return Ok(None);
        };

        let states = checklist::evaluate(
            plan.admission_date,
            &plan.planning_progress,
            params.review,
            Zoned::now().date(),
        );
        Ok(Some(StepStates(states)))
    }

    /// Handle toggling a checklist step's completion state.
    ///
    /// Completing a step whose prerequisite is incomplete fails with
    /// [`CoordinatorError::BlockedStep`] and leaves the plan untouched;
    /// un-completing always succeeds and never cascades to dependents.
    pub async fn toggle_step(&self, params: &ToggleStep) -> Result<StepToggleResult> {
        let step = params.validate()?;
        debug!("toggle step {step} for client {}", params.client_id);

        let plan = self
            .update_client(params.client_id, move |plan| {
                let progress = checklist::toggle(step, &plan.planning_progress)?;
                Ok(plan.apply(PlanPatch::progress(progress), Timestamp::now()))
            })
            .await?;

        let completed = plan
            .planning_progress
            .get(&step)
            .copied()
            .unwrap_or(false);
        Ok(StepToggleResult {
            plan,
            step,
            completed,
        })
    }

    /// Handle writing one weekly case-review update field.
    ///
    /// The field text and its freshness timestamp are stamped together.
    pub async fn write_weekly_update(&self, params: &WriteWeeklyUpdate) -> Result<ClientPlan> {
        let field = params.validate()?;
        let text = params.text.clone();

        self.update_client(params.client_id, move |plan| {
            let updates = weekly::write(&plan.weekly_updates, field, &text, Timestamp::now());
            Ok(plan.apply(PlanPatch::weekly_updates(updates), Timestamp::now()))
        })
        .await
    }

    /// Handle producing the weekly review report: stale update fields and
    /// checklist steps needing recurring attention.
    ///
    /// Returns None if the client doesn't exist.
    pub async fn weekly_review(&self, params: &Id) -> Result<Option<ReviewReport>> {
        let Some(plan) = self.get_client(params).await? else {
            return Ok(None);
        };

        let stale_fields = weekly::stale_fields(&plan.weekly_updates, Timestamp::now());
        let attention = checklist::evaluate(
            plan.admission_date,
            &plan.planning_progress,
            true,
            Zoned::now().date(),
        )
        .into_iter()
        .filter(|state| state.needs_recurring_attention)
        .collect();

        Ok(Some(ReviewReport {
            plan,
            stale_fields,
            attention,
        }))
    }

    /// Handle adding a follow-up task.
    pub async fn add_task(&self, params: &AddTask) -> Result<ClientPlan> {
        let priority = params.validate()?;
        let text = params.text.clone();

        self.update_client(params.client_id, move |plan| {
            let mut tasks = plan.tasks.clone();
            tasks.push(Task {
                id: plan.next_task_id(),
                text,
                completed: false,
                priority,
            });
            Ok(plan.apply(PlanPatch::tasks(tasks), Timestamp::now()))
        })
        .await
    }

    /// Handle toggling a follow-up task's completion flag.
    pub async fn toggle_task(&self, params: &TaskRef) -> Result<ClientPlan> {
        let task_id = params.task_id;

        self.update_client(params.client_id, move |plan| {
            let mut tasks = plan.tasks.clone();
            let task = tasks
                .iter_mut()
                .find(|task| task.id == task_id)
                .ok_or_else(|| {
                    CoordinatorError::invalid_input("task_id", format!("Task {task_id} not found"))
                })?;
            task.completed = !task.completed;
            Ok(plan.apply(PlanPatch::tasks(tasks), Timestamp::now()))
        })
        .await
    }

    /// Handle removing a follow-up task. Removing an unknown id is a no-op.
    pub async fn remove_task(&self, params: &TaskRef) -> Result<ClientPlan> {
        let task_id = params.task_id;

        self.update_client(params.client_id, move |plan| {
            let tasks = plan
                .tasks
                .iter()
                .filter(|task| task.id != task_id)
                .cloned()
                .collect();
            Ok(plan.apply(PlanPatch::tasks(tasks), Timestamp::now()))
        })
        .await
    }

    /// Handle updating the referent contact record field by field.
    ///
    /// Only the populated fields are written; the rest of the record keeps
    /// its current values.
    pub async fn set_referent(&self, params: &SetReferent) -> Result<ClientPlan> {
        let update = params.validate()?;

        self.update_client(params.client_id, move |plan| {
            let mut referent = plan.referent.clone();
            if let Some(name) = update.name {
                referent.name = Some(name);
            }
            if let Some(referent_type) = update.referent_type {
                referent.referent_type = Some(referent_type);
            }
            if let Some(role) = update.role {
                referent.role = Some(role);
            }
            if let Some(date) = update.last_contact_date {
                referent.last_contact_date = Some(date);
            }
            if let Some(date) = update.next_contact_date {
                referent.next_contact_date = Some(date);
            }

            let patch = PlanPatch {
                referent: Some(referent),
                ..Default::default()
            };
            Ok(plan.apply(patch, Timestamp::now()))
        })
        .await
    }
}
