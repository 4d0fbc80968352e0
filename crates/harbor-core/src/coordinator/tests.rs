//! Unit tests for coordinator handlers over a temporary database.

use std::path::PathBuf;

use tempfile::TempDir;

use super::builder::CoordinatorBuilder;
use super::Coordinator;
use crate::error::CoordinatorError;
use crate::models::{PlacementStatus, ProgramRef, StepKey};
use crate::params::{
    AddPrograms, AddTask, ChecklistStatus, CreateClient, Id, ListClients, RemoveProgram,
    SetPlacementNotes, SetPlacementStatus, SetReferent, TaskRef, ToggleStep, WriteWeeklyUpdate,
};

fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test_harbor.db");
    (temp_dir, db_path)
}

async fn test_coordinator(db_path: &PathBuf) -> Coordinator {
    CoordinatorBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create coordinator")
}

async fn admit_test_client(coordinator: &Coordinator) -> u64 {
    let plan = coordinator
        .create_client_result(&CreateClient {
            name: "Jordan P.".to_string(),
            admission_date: "2025-03-01".to_string(),
            estimated_discharge_date: Some("2025-04-15".to_string()),
        })
        .await
        .expect("Failed to admit client");
    plan.id
}

fn program(id: &str) -> ProgramRef {
    ProgramRef {
        program_id: id.to_string(),
        program_name: format!("Cedar Ridge - {id}"),
    }
}

#[tokio::test]
async fn admit_creates_empty_plan() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;

    let id = admit_test_client(&coordinator).await;
    let plan = coordinator
        .get_client(&Id { id })
        .await
        .unwrap()
        .expect("plan exists");

    assert_eq!(plan.name, "Jordan P.");
    assert!(plan.planning_progress.is_empty());
    assert!(plan.shortlist.is_empty());
    assert!(plan.tasks.is_empty());
    assert_eq!(plan.revision, 0);
}

#[tokio::test]
async fn toggle_step_persists_progress() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let result = coordinator
        .toggle_step(&ToggleStep {
            client_id: id,
            step: "extensionScheduled".to_string(),
        })
        .await
        .expect("toggle succeeds");
    assert!(result.completed);

    let plan = coordinator.get_client(&Id { id }).await.unwrap().unwrap();
    assert_eq!(
        plan.planning_progress.get(&StepKey::ExtensionScheduled),
        Some(&true)
    );
    assert_eq!(plan.revision, 1);
}

#[tokio::test]
async fn toggle_blocked_step_leaves_plan_unchanged() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let before = coordinator.get_client(&Id { id }).await.unwrap().unwrap();

    let err = coordinator
        .toggle_step(&ToggleStep {
            client_id: id,
            step: "emailSent".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::BlockedStep { .. }));

    let after = coordinator.get_client(&Id { id }).await.unwrap().unwrap();
    assert_eq!(after, before, "rejected toggle must not mutate the plan");
}

#[tokio::test]
async fn checklist_status_reports_definition_order() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let states = coordinator
        .checklist_status(&ChecklistStatus {
            client_id: id,
            review: false,
        })
        .await
        .unwrap()
        .expect("client exists");

    assert_eq!(states.len(), 10);
    assert_eq!(states[0].key, StepKey::ExtensionScheduled);
    assert!(states[1].blocked);

    let missing = coordinator
        .checklist_status(&ChecklistStatus {
            client_id: 9999,
            review: false,
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn shortlist_add_dedups_and_reports_counts() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let result = coordinator
        .add_programs(&AddPrograms {
            client_id: id,
            programs: vec![program("p1"), program("p2")],
        })
        .await
        .unwrap();
    assert_eq!(result.added, 2);
    assert_eq!(result.skipped(), 0);

    // Re-adding p1 alongside a new program only adds the new one.
    let result = coordinator
        .add_programs(&AddPrograms {
            client_id: id,
            programs: vec![program("p1"), program("p3")],
        })
        .await
        .unwrap();
    assert_eq!(result.added, 1);
    assert_eq!(result.skipped(), 1);
    assert_eq!(result.plan.shortlist.len(), 3);
}

#[tokio::test]
async fn placement_status_round_trip() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    coordinator
        .add_programs(&AddPrograms {
            client_id: id,
            programs: vec![program("p1")],
        })
        .await
        .unwrap();

    let plan = coordinator
        .set_placement_status(&SetPlacementStatus {
            client_id: id,
            program_id: "p1".to_string(),
            status: "Confirmed".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(plan.shortlist[0].status, PlacementStatus::Confirmed);

    // An invalid status is rejected before anything is written.
    let before = coordinator.get_client(&Id { id }).await.unwrap().unwrap();
    let err = coordinator
        .set_placement_status(&SetPlacementStatus {
            client_id: id,
            program_id: "p1".to_string(),
            status: "Maybe".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::InvalidStatus { .. }));
    let after = coordinator.get_client(&Id { id }).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn placement_updates_for_unknown_program_fail() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let err = coordinator
        .set_placement_status(&SetPlacementStatus {
            client_id: id,
            program_id: "ghost".to_string(),
            status: "Vetting".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::EntryNotFound { .. }));

    let err = coordinator
        .set_placement_notes(&SetPlacementNotes {
            client_id: id,
            program_id: "ghost".to_string(),
            notes: "n/a".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::EntryNotFound { .. }));
}

#[tokio::test]
async fn shortlist_lifecycle_allows_re_add_after_remove() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    coordinator
        .add_programs(&AddPrograms {
            client_id: id,
            programs: vec![program("p1")],
        })
        .await
        .unwrap();
    coordinator
        .set_placement_status(&SetPlacementStatus {
            client_id: id,
            program_id: "p1".to_string(),
            status: "Confirmed".to_string(),
        })
        .await
        .unwrap();

    let plan = coordinator
        .remove_program(&RemoveProgram {
            client_id: id,
            program_id: "p1".to_string(),
        })
        .await
        .unwrap();
    assert!(plan.shortlist.is_empty());

    // No tombstone: the same program can be shortlisted again.
    let result = coordinator
        .add_programs(&AddPrograms {
            client_id: id,
            programs: vec![program("p1")],
        })
        .await
        .unwrap();
    assert_eq!(result.added, 1);
    assert_eq!(result.plan.shortlist[0].status, PlacementStatus::Vetting);
}

#[tokio::test]
async fn weekly_update_stamps_text_and_timestamp() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let plan = coordinator
        .write_weekly_update(&WriteWeeklyUpdate {
            client_id: id,
            field: "weeklyProgress".to_string(),
            text: "family call went well".to_string(),
        })
        .await
        .unwrap();

    let field = plan
        .weekly_updates
        .get(&crate::models::FieldKey::Progress)
        .expect("field written");
    assert_eq!(field.text, "family call went well");
    assert!(field.last_updated_at.is_some());

    // A freshly written field drops out of the stale list.
    let report = coordinator
        .weekly_review(&Id { id })
        .await
        .unwrap()
        .expect("client exists");
    assert!(!report
        .stale_fields
        .contains(&crate::models::FieldKey::Progress));
    assert_eq!(report.stale_fields.len(), 3);
}

#[tokio::test]
async fn task_lifecycle() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let plan = coordinator
        .add_task(&AddTask {
            client_id: id,
            text: "fax records to receiving program".to_string(),
            priority: Some("high".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(plan.tasks.len(), 1);
    let task_id = plan.tasks[0].id;

    let plan = coordinator
        .toggle_task(&TaskRef {
            client_id: id,
            task_id,
        })
        .await
        .unwrap();
    assert!(plan.tasks[0].completed);

    let plan = coordinator
        .remove_task(&TaskRef {
            client_id: id,
            task_id,
        })
        .await
        .unwrap();
    assert!(plan.tasks.is_empty());

    let err = coordinator
        .toggle_task(&TaskRef {
            client_id: id,
            task_id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::InvalidInput { .. }));
}

#[tokio::test]
async fn referent_updates_merge_field_by_field() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    coordinator
        .set_referent(&SetReferent {
            client_id: id,
            name: Some("Dana R.".to_string()),
            referent_type: Some("Therapist".to_string()),
            role: None,
            last_contact_date: None,
            next_contact_date: None,
        })
        .await
        .unwrap();

    // A later partial update keeps earlier fields.
    let plan = coordinator
        .set_referent(&SetReferent {
            client_id: id,
            name: None,
            referent_type: None,
            role: Some("Leading Aftercare".to_string()),
            last_contact_date: Some("2025-03-10".to_string()),
            next_contact_date: None,
        })
        .await
        .unwrap();

    assert_eq!(plan.referent.name.as_deref(), Some("Dana R."));
    assert_eq!(
        plan.referent.referent_type,
        Some(crate::models::ReferentType::Therapist)
    );
    assert_eq!(
        plan.referent.role,
        Some(crate::models::ReferentRole::LeadingAftercare)
    );
}

#[tokio::test]
async fn discharge_and_reopen_move_between_lists() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;
    let id = admit_test_client(&coordinator).await;

    let active = coordinator
        .list_clients_summary(&ListClients { discharged: false })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);

    let discharged = coordinator
        .discharge_client_result(&Id { id })
        .await
        .unwrap()
        .expect("client exists");
    assert_eq!(discharged.status, crate::models::PlanStatus::Discharged);

    let active = coordinator
        .list_clients_summary(&ListClients { discharged: false })
        .await
        .unwrap();
    assert!(active.is_empty());

    let archived = coordinator
        .list_clients_summary(&ListClients { discharged: true })
        .await
        .unwrap();
    assert_eq!(archived.len(), 1);

    coordinator
        .reopen_client_result(&Id { id })
        .await
        .unwrap()
        .expect("client exists");
    let active = coordinator
        .list_clients_summary(&ListClients { discharged: false })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn operations_on_missing_clients_fail_cleanly() {
    let (_temp_dir, db_path) = create_test_environment();
    let coordinator = test_coordinator(&db_path).await;

    let err = coordinator
        .toggle_step(&ToggleStep {
            client_id: 42,
            step: "extensionScheduled".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::ClientNotFound { id: 42 }));

    let missing = coordinator
        .discharge_client_result(&Id { id: 42 })
        .await
        .unwrap();
    assert!(missing.is_none());
}
