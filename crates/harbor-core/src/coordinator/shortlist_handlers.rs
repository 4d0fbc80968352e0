//! Shortlist handler operations for the Coordinator.

use jiff::Timestamp;
use log::debug;

use super::Coordinator;
use crate::display::ShortlistAddResult;
use crate::error::Result;
use crate::models::{ClientPlan, PlanPatch};
use crate::params::{AddPrograms, RemoveProgram, SetPlacementNotes, SetPlacementStatus};
use crate::shortlist;

impl Coordinator {
    /// Handle adding candidate programs to a client's shortlist.
    ///
    /// Programs already on the shortlist are skipped; the result reports how
    /// many entries were actually added so the caller can surface
    /// "N already on shortlist".
    pub async fn add_programs(&self, params: &AddPrograms) -> Result<ShortlistAddResult> {
        let candidates = params.programs.clone();
        let requested = candidates.len();
        debug!(
            "adding {requested} candidate program(s) to client {}",
            params.client_id
        );

        let (plan, added) = self
            .update_client_with(params.client_id, move |plan| {
                let (next, added) = shortlist::add(&plan.shortlist, &candidates);
                Ok((plan.apply(PlanPatch::shortlist(next), Timestamp::now()), added))
            })
            .await?;

        Ok(ShortlistAddResult {
            plan,
            requested,
            added,
        })
    }

    /// Handle removing a program from the shortlist (hard delete, no
    /// tombstone). Removing an absent program is a no-op.
    pub async fn remove_program(&self, params: &RemoveProgram) -> Result<ClientPlan> {
        let program_id = params.program_id.clone();

        self.update_client(params.client_id, move |plan| {
            let next = shortlist::remove(&plan.shortlist, &program_id);
            Ok(plan.apply(PlanPatch::shortlist(next), Timestamp::now()))
        })
        .await
    }

    /// Handle changing a shortlisted placement's status.
    ///
    /// The status string is validated against the closed vocabulary before
    /// the store is touched; no other entry is modified.
    pub async fn set_placement_status(&self, params: &SetPlacementStatus) -> Result<ClientPlan> {
        let status = params.validate()?;
        let program_id = params.program_id.clone();

        self.update_client(params.client_id, move |plan| {
            let next = shortlist::set_status(&plan.shortlist, &program_id, status)?;
            Ok(plan.apply(PlanPatch::shortlist(next), Timestamp::now()))
        })
        .await
    }

    /// Handle replacing a shortlisted placement's notes.
    pub async fn set_placement_notes(&self, params: &SetPlacementNotes) -> Result<ClientPlan> {
        let program_id = params.program_id.clone();
        let notes = params.notes.clone();

        self.update_client(params.client_id, move |plan| {
            let next = shortlist::set_notes(&plan.shortlist, &program_id, &notes)?;
            Ok(plan.apply(PlanPatch::shortlist(next), Timestamp::now()))
        })
        .await
    }
}
