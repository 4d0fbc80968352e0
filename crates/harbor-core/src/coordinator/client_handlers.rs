//! Client-level handler operations returning formatted wrapper types.

use jiff::{Timestamp, Zoned};
use log::info;

use super::Coordinator;
use crate::display::{ClientSummaries, Workspace};
use crate::error::Result;
use crate::models::{ClientPlan, ClientSummary, PlanPatch};
use crate::params::{ChecklistStatus, CreateClient, Id, ListClients, SetDischargeDate};
use crate::{checklist, weekly};

impl Coordinator {
    /// Handle admitting a new client.
    ///
    /// Creates the plan with every checklist step incomplete and an empty
    /// shortlist, and returns it for confirmation.
    pub async fn create_client_result(&self, params: &CreateClient) -> Result<ClientPlan> {
        let plan = self.create_client(params).await?;
        info!("admitted client {} (ID {})", plan.name, plan.id);
        Ok(plan)
    }

    /// Handle listing clients as summaries with checklist statistics.
    pub async fn list_clients_summary(&self, params: &ListClients) -> Result<ClientSummaries> {
        let plans = self.list_clients(params).await?;
        let summaries: Vec<ClientSummary> = plans.iter().map(Into::into).collect();
        Ok(ClientSummaries(summaries))
    }

    /// Handle showing a client's full workspace: checklist evaluated against
    /// today's date, shortlist, tasks, weekly updates and referent record.
    ///
    /// Returns None if the client doesn't exist.
    pub async fn client_workspace(&self, params: &ChecklistStatus) -> Result<Option<Workspace>> {
        let Some(plan) = self.get_client(&Id { id: params.client_id }).await? else {
            return Ok(None);
        };

        let today = Zoned::now().date();
        let states = checklist::evaluate(
            plan.admission_date,
            &plan.planning_progress,
            params.review,
            today,
        );
        let stale_fields = weekly::stale_fields(&plan.weekly_updates, Timestamp::now());

        Ok(Some(Workspace {
            plan,
            states,
            stale_fields,
            review: params.review,
        }))
    }

    /// Handle revising the estimated discharge date.
    pub async fn set_discharge_date(&self, params: &SetDischargeDate) -> Result<ClientPlan> {
        let date = params.validate()?;
        self.update_client(params.client_id, move |plan| {
            let patch = PlanPatch {
                estimated_discharge_date: Some(date),
                ..Default::default()
            };
            Ok(plan.apply(patch, Timestamp::now()))
        })
        .await
    }

    /// Handle marking a client discharged.
    ///
    /// A status transition, not a deletion: the plan stays on file and can
    /// be reopened. Returns None if the client doesn't exist.
    pub async fn discharge_client_result(&self, params: &Id) -> Result<Option<ClientPlan>> {
        let plan = self.discharge_client(params).await?;
        if let Some(ref plan) = plan {
            info!("discharged client {} (ID {})", plan.name, plan.id);
        }
        Ok(plan)
    }

    /// Handle restoring a discharged client to active.
    /// Returns None if the client doesn't exist.
    pub async fn reopen_client_result(&self, params: &Id) -> Result<Option<ClientPlan>> {
        let plan = self.reopen_client(params).await?;
        if let Some(ref plan) = plan {
            info!("reopened client {} (ID {})", plan.name, plan.id);
        }
        Ok(plan)
    }

    /// Apply an arbitrary partial change set to a client plan.
    ///
    /// The single coarse-grained mutation entry point: the patch is
    /// shallow-merged, `last_updated` is stamped, and the whole document is
    /// persisted under the revision guard. All the specialized handlers
    /// funnel through the same path.
    pub async fn apply_update(&self, id: u64, patch: PlanPatch) -> Result<ClientPlan> {
        self.update_client(id, move |plan| Ok(plan.apply(patch, Timestamp::now())))
            .await
    }
}
