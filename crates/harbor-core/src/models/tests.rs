//! Unit tests for the domain models.

use std::collections::BTreeMap;

use jiff::civil::date;
use jiff::Timestamp;

use super::*;

fn test_plan() -> ClientPlan {
    ClientPlan {
        id: 1,
        name: "Jordan P.".to_string(),
        status: PlanStatus::Active,
        admission_date: date(2025, 3, 1),
        estimated_discharge_date: None,
        planning_progress: BTreeMap::new(),
        shortlist: Vec::new(),
        tasks: Vec::new(),
        weekly_updates: BTreeMap::new(),
        referent: Referent::default(),
        revision: 0,
        created_at: Timestamp::from_second(1_740_000_000).unwrap(),
        last_updated: Timestamp::from_second(1_740_000_000).unwrap(),
    }
}

#[test]
fn step_keys_serialize_to_document_form() {
    let json = serde_json::to_string(&StepKey::ExtensionScheduled).unwrap();
    assert_eq!(json, "\"extensionScheduled\"");

    let json = serde_json::to_string(&StepKey::KipuUpdated).unwrap();
    assert_eq!(json, "\"kipuUpdated\"");

    let key: StepKey = serde_json::from_str("\"aftercareThreadLaunched\"").unwrap();
    assert_eq!(key, StepKey::AftercareThreadLaunched);
}

#[test]
fn progress_map_round_trips_as_json_object() {
    let mut progress = ProgressMap::new();
    progress.insert(StepKey::ExtensionScheduled, true);
    progress.insert(StepKey::EmailSent, false);

    let json = serde_json::to_string(&progress).unwrap();
    assert_eq!(json, "{\"extensionScheduled\":true,\"emailSent\":false}");

    let back: ProgressMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, progress);
}

#[test]
fn progress_map_keys_iterate_in_chain_order() {
    let mut progress = ProgressMap::new();
    progress.insert(StepKey::KipuUpdated, true);
    progress.insert(StepKey::ExtensionScheduled, true);

    let keys: Vec<StepKey> = progress.keys().copied().collect();
    assert_eq!(keys, vec![StepKey::ExtensionScheduled, StepKey::KipuUpdated]);
}

#[test]
fn placement_status_uses_display_strings() {
    let json = serde_json::to_string(&PlacementStatus::PresentedToFamily).unwrap();
    assert_eq!(json, "\"Presented to Family\"");

    let status: PlacementStatus = serde_json::from_str("\"Application Submitted\"").unwrap();
    assert_eq!(status, PlacementStatus::ApplicationSubmitted);
}

#[test]
fn placement_status_parses_loosely() {
    for (raw, expected) in [
        ("vetting", PlacementStatus::Vetting),
        ("Presented to Family", PlacementStatus::PresentedToFamily),
        ("presented-to-family", PlacementStatus::PresentedToFamily),
        ("APPLICATION_SUBMITTED", PlacementStatus::ApplicationSubmitted),
    ] {
        assert_eq!(raw.parse::<PlacementStatus>().unwrap(), expected, "{raw}");
    }

    assert!("Maybe".parse::<PlacementStatus>().is_err());
}

#[test]
fn weekly_field_keys_match_document_shape() {
    let mut updates = WeeklyUpdates::new();
    updates.insert(
        FieldKey::Progress,
        WeeklyUpdate {
            text: "good week".to_string(),
            last_updated_at: None,
        },
    );

    let json = serde_json::to_string(&updates).unwrap();
    assert!(json.contains("\"weeklyProgress\""));
    assert!(json.contains("\"lastUpdatedAt\":null"));
}

#[test]
fn referent_serializes_with_type_key() {
    let referent = Referent {
        name: Some("Dana R.".to_string()),
        referent_type: Some(ReferentType::EducationalConsultant),
        role: Some(ReferentRole::LeadingAftercare),
        last_contact_date: Some(date(2025, 3, 10)),
        next_contact_date: None,
    };

    let json = serde_json::to_string(&referent).unwrap();
    assert!(json.contains("\"type\":\"Educational Consultant\""));
    assert!(json.contains("\"role\":\"Leading Aftercare\""));
    assert!(json.contains("\"lastContactDate\":\"2025-03-10\""));

    let back: Referent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, referent);
}

#[test]
fn client_plan_serde_round_trip() {
    let mut plan = test_plan();
    plan.planning_progress.insert(StepKey::ExtensionScheduled, true);
    plan.shortlist.push(ShortlistEntry {
        program_id: "p1".to_string(),
        program_name: "Cedar Ridge - Wilderness".to_string(),
        status: PlacementStatus::Waitlisted,
        notes: "intake call Tuesday".to_string(),
    });
    plan.tasks.push(Task {
        id: 1,
        text: "fax records".to_string(),
        completed: false,
        priority: TaskPriority::High,
    });

    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"admissionDate\":\"2025-03-01\""));
    assert!(json.contains("\"programId\":\"p1\""));

    let back: ClientPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn apply_replaces_only_provided_fields() {
    let plan = test_plan();
    let now = Timestamp::from_second(1_750_000_000).unwrap();

    let mut progress = ProgressMap::new();
    progress.insert(StepKey::ExtensionScheduled, true);

    let patched = plan.clone().apply(PlanPatch::progress(progress.clone()), now);
    assert_eq!(patched.planning_progress, progress);
    // Untouched fields survive.
    assert_eq!(patched.name, plan.name);
    assert_eq!(patched.shortlist, plan.shortlist);
    assert_eq!(patched.status, plan.status);
}

#[test]
fn apply_always_stamps_last_updated() {
    let plan = test_plan();
    let now = Timestamp::from_second(1_750_000_000).unwrap();

    // Even an empty patch stamps the timestamp.
    let patched = plan.apply(PlanPatch::default(), now);
    assert_eq!(patched.last_updated, now);
}

#[test]
fn next_task_id_is_monotonic() {
    let mut plan = test_plan();
    assert_eq!(plan.next_task_id(), 1);

    plan.tasks.push(Task {
        id: 1,
        text: "a".to_string(),
        completed: false,
        priority: TaskPriority::Medium,
    });
    plan.tasks.push(Task {
        id: 5,
        text: "b".to_string(),
        completed: false,
        priority: TaskPriority::Medium,
    });
    assert_eq!(plan.next_task_id(), 6);

    // Removing the highest id may reuse it; ids only need to be unique
    // within the current list.
    plan.tasks.retain(|t| t.id != 5);
    assert_eq!(plan.next_task_id(), 2);
}

#[test]
fn step_definitions_expose_reference_data() {
    let defs = checklist_steps();
    assert_eq!(defs.len(), 10);

    let first = &defs[0];
    assert_eq!(first.key, StepKey::ExtensionScheduled);
    assert_eq!(first.due_after_days, 14);
    assert_eq!(first.depends_on, None);

    let last = &defs[9];
    assert_eq!(last.key, StepKey::KipuUpdated);
    assert_eq!(last.due_after_days, 43);
    assert_eq!(last.depends_on, Some(StepKey::WarmHandoffCompleted));
    assert_eq!(last.priority, StepPriority::Medium);

    // Every step after the first depends on its predecessor.
    for pair in defs.windows(2) {
        assert_eq!(pair[1].depends_on, Some(pair[0].key));
    }
}

#[test]
fn every_step_key_resolves_its_own_definition() {
    for def in checklist_steps() {
        assert_eq!(def.key.definition().key, def.key);
    }
}

#[test]
fn plan_status_parses_and_formats() {
    assert_eq!("active".parse::<PlanStatus>().unwrap(), PlanStatus::Active);
    assert_eq!(
        "Discharged".parse::<PlanStatus>().unwrap(),
        PlanStatus::Discharged
    );
    assert!("archived".parse::<PlanStatus>().is_err());
    assert_eq!(PlanStatus::Discharged.as_str(), "discharged");
}
