//! Parameter structures for Harbor operations.
//!
//! Shared, interface-agnostic parameter structs used by every surface (CLI,
//! MCP). Interface layers wrap these with their own framework derives (clap
//! argument structs, transparent serde wrappers for MCP) and convert via
//! `From`/accessor methods, so the core stays free of framework
//! dependencies.
//!
//! Fields that cross the interface boundary as free-form strings (placement
//! statuses, step keys, weekly field names, dates) carry `validate()`
//! methods that parse them into the closed domain types, rejecting anything
//! outside the enumerated vocabulary before an engine ever sees it.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoordinatorError, Result};
use crate::models::{
    FieldKey, PlacementStatus, ProgramRef, ReferentRole, ReferentType, StepKey, TaskPriority,
};

/// Generic parameters for operations requiring just a client ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the client plan to operate on
    pub id: u64,
}

/// Parameters for admitting a new client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateClient {
    /// Client display name (required)
    pub name: String,
    /// Admission date in `YYYY-MM-DD` form (required); anchors all checklist
    /// due dates
    pub admission_date: String,
    /// Optional estimated discharge date in `YYYY-MM-DD` form
    pub estimated_discharge_date: Option<String>,
}

impl CreateClient {
    /// Parse and validate the date fields.
    pub fn validate(&self) -> Result<(jiff::civil::Date, Option<jiff::civil::Date>)> {
        let admission = parse_date("admission_date", &self.admission_date)?;
        let discharge = self
            .estimated_discharge_date
            .as_deref()
            .map(|raw| parse_date("estimated_discharge_date", raw))
            .transpose()?;
        Ok((admission, discharge))
    }
}

/// Parameters for listing client plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListClients {
    /// Show discharged clients instead of active ones
    #[serde(default)]
    pub discharged: bool,
}

/// Parameters for revising a client's estimated discharge date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetDischargeDate {
    /// Client plan ID
    pub client_id: u64,
    /// New estimated discharge date in `YYYY-MM-DD` form
    pub date: String,
}

impl SetDischargeDate {
    pub fn validate(&self) -> Result<jiff::civil::Date> {
        parse_date("date", &self.date)
    }
}

/// Parameters for evaluating a client's checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChecklistStatus {
    /// Client plan ID
    pub client_id: u64,
    /// Evaluate in review mode (flags steps needing weekly attention)
    #[serde(default)]
    pub review: bool,
}

/// Parameters for toggling a checklist step's completion state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToggleStep {
    /// Client plan ID
    pub client_id: u64,
    /// Checklist step key, e.g. `extensionScheduled`
    pub step: String,
}

impl ToggleStep {
    /// Parse the step key, rejecting anything outside the fixed checklist.
    pub fn validate(&self) -> Result<StepKey> {
        StepKey::from_str(&self.step).map_err(|_| {
            CoordinatorError::invalid_input(
                "step",
                format!("Unknown checklist step: {}", self.step),
            )
        })
    }
}

/// Parameters for adding candidate programs to a client's shortlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddPrograms {
    /// Client plan ID
    pub client_id: u64,
    /// Resolved program references (id + display name pairs); programs
    /// already on the shortlist are skipped
    pub programs: Vec<ProgramRef>,
}

/// Parameters for removing a program from a client's shortlist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RemoveProgram {
    /// Client plan ID
    pub client_id: u64,
    /// Program identifier to remove
    pub program_id: String,
}

/// Parameters for changing a shortlisted placement's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetPlacementStatus {
    /// Client plan ID
    pub client_id: u64,
    /// Program identifier on the shortlist
    pub program_id: String,
    /// New placement status. One of: 'Vetting', 'Presented to Family',
    /// 'Application Submitted', 'Confirmed', 'Declined', 'Waitlisted'
    pub status: String,
}

impl SetPlacementStatus {
    /// Parse the status, rejecting values outside the enumerated vocabulary.
    pub fn validate(&self) -> Result<PlacementStatus> {
        PlacementStatus::from_str(&self.status).map_err(|_| CoordinatorError::InvalidStatus {
            value: self.status.clone(),
        })
    }
}

/// Parameters for replacing a shortlisted placement's notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetPlacementNotes {
    /// Client plan ID
    pub client_id: u64,
    /// Program identifier on the shortlist
    pub program_id: String,
    /// Replacement notes text
    pub notes: String,
}

/// Parameters for writing one weekly case-review update field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WriteWeeklyUpdate {
    /// Client plan ID
    pub client_id: u64,
    /// Field to write: 'weeklyProgress', 'weeklyObstacles', 'nextWeekPlan'
    /// or 'familyUpdates'
    pub field: String,
    /// Replacement field text
    pub text: String,
}

impl WriteWeeklyUpdate {
    /// Parse the field key, rejecting unknown field names.
    pub fn validate(&self) -> Result<FieldKey> {
        FieldKey::from_str(&self.field).map_err(|_| CoordinatorError::UnknownField {
            value: self.field.clone(),
        })
    }
}

/// Parameters for adding a follow-up task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// Client plan ID
    pub client_id: u64,
    /// Task text (required)
    pub text: String,
    /// Optional priority: 'high', 'medium' (default) or 'low'
    pub priority: Option<String>,
}

impl AddTask {
    /// Parse the optional priority.
    pub fn validate(&self) -> Result<TaskPriority> {
        match self.priority.as_deref() {
            None => Ok(TaskPriority::Medium),
            Some(raw) => TaskPriority::from_str(raw).map_err(|_| {
                CoordinatorError::invalid_input(
                    "priority",
                    format!("Invalid task priority: {raw}. Must be 'high', 'medium' or 'low'"),
                )
            }),
        }
    }
}

/// Parameters for toggling or removing a follow-up task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskRef {
    /// Client plan ID
    pub client_id: u64,
    /// Task identifier within the plan
    pub task_id: u64,
}

/// Parameters for updating the referent contact record field by field.
///
/// Only populated fields are written; everything else keeps its current
/// value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetReferent {
    /// Client plan ID
    pub client_id: u64,
    /// Referent display name
    pub name: Option<String>,
    /// Referent type: 'Educational Consultant', 'Therapist', 'Psychiatrist',
    /// 'Probation Officer', 'Family Friend' or 'Other'
    pub referent_type: Option<String>,
    /// Role in aftercare: 'Leading Aftercare', 'Handling Options', 'Both' or
    /// 'Observing'
    pub role: Option<String>,
    /// Date of the most recent contact, `YYYY-MM-DD`
    pub last_contact_date: Option<String>,
    /// Date of the next planned contact, `YYYY-MM-DD`
    pub next_contact_date: Option<String>,
}

/// Validated referent field updates.
#[derive(Debug, Clone, Default)]
pub struct ReferentUpdate {
    pub name: Option<String>,
    pub referent_type: Option<ReferentType>,
    pub role: Option<ReferentRole>,
    pub last_contact_date: Option<jiff::civil::Date>,
    pub next_contact_date: Option<jiff::civil::Date>,
}

impl SetReferent {
    /// Parse and validate the typed fields.
    pub fn validate(&self) -> Result<ReferentUpdate> {
        let referent_type = self
            .referent_type
            .as_deref()
            .map(|raw| {
                ReferentType::from_str(raw).map_err(|_| {
                    CoordinatorError::invalid_input(
                        "referent_type",
                        format!("Invalid referent type: {raw}"),
                    )
                })
            })
            .transpose()?;
        let role = self
            .role
            .as_deref()
            .map(|raw| {
                ReferentRole::from_str(raw).map_err(|_| {
                    CoordinatorError::invalid_input("role", format!("Invalid referent role: {raw}"))
                })
            })
            .transpose()?;
        let last_contact_date = self
            .last_contact_date
            .as_deref()
            .map(|raw| parse_date("last_contact_date", raw))
            .transpose()?;
        let next_contact_date = self
            .next_contact_date
            .as_deref()
            .map(|raw| parse_date("next_contact_date", raw))
            .transpose()?;

        Ok(ReferentUpdate {
            name: self.name.clone(),
            referent_type,
            role,
            last_contact_date,
            next_contact_date,
        })
    }
}

fn parse_date(field: &str, raw: &str) -> Result<jiff::civil::Date> {
    raw.parse().map_err(|_| {
        CoordinatorError::invalid_input(field, format!("Invalid date '{raw}', expected YYYY-MM-DD"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_client_parses_dates() {
        let params = CreateClient {
            name: "Jordan P.".to_string(),
            admission_date: "2025-03-01".to_string(),
            estimated_discharge_date: Some("2025-04-15".to_string()),
        };
        let (admission, discharge) = params.validate().unwrap();
        assert_eq!(admission, jiff::civil::date(2025, 3, 1));
        assert_eq!(discharge, Some(jiff::civil::date(2025, 4, 15)));
    }

    #[test]
    fn create_client_rejects_malformed_date() {
        let params = CreateClient {
            name: "Jordan P.".to_string(),
            admission_date: "03/01/2025".to_string(),
            estimated_discharge_date: None,
        };
        assert!(matches!(
            params.validate(),
            Err(CoordinatorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn toggle_step_accepts_document_keys() {
        let params = ToggleStep {
            client_id: 1,
            step: "aftercareThreadLaunched".to_string(),
        };
        assert_eq!(params.validate().unwrap(), StepKey::AftercareThreadLaunched);

        // Kebab-case from the CLI works too.
        let params = ToggleStep {
            client_id: 1,
            step: "aftercare-thread-launched".to_string(),
        };
        assert_eq!(params.validate().unwrap(), StepKey::AftercareThreadLaunched);
    }

    #[test]
    fn toggle_step_rejects_unknown_keys() {
        let params = ToggleStep {
            client_id: 1,
            step: "packBags".to_string(),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn placement_status_accepts_display_strings() {
        let params = SetPlacementStatus {
            client_id: 1,
            program_id: "p1".to_string(),
            status: "Presented to Family".to_string(),
        };
        assert_eq!(
            params.validate().unwrap(),
            PlacementStatus::PresentedToFamily
        );
    }

    #[test]
    fn placement_status_rejects_unknown_values() {
        let params = SetPlacementStatus {
            client_id: 1,
            program_id: "p1".to_string(),
            status: "Maybe".to_string(),
        };
        match params.validate().unwrap_err() {
            CoordinatorError::InvalidStatus { value } => assert_eq!(value, "Maybe"),
            other => panic!("expected InvalidStatus, got {other:?}"),
        }
    }

    #[test]
    fn weekly_field_names_parse() {
        for (raw, expected) in [
            ("weeklyProgress", FieldKey::Progress),
            ("obstacles", FieldKey::Obstacles),
            ("next-week-plan", FieldKey::NextWeekPlan),
            ("familyUpdates", FieldKey::FamilyCommunication),
        ] {
            let params = WriteWeeklyUpdate {
                client_id: 1,
                field: raw.to_string(),
                text: String::new(),
            };
            assert_eq!(params.validate().unwrap(), expected, "field {raw}");
        }
    }

    #[test]
    fn referent_update_validates_enums() {
        let params = SetReferent {
            client_id: 1,
            name: Some("Dana R.".to_string()),
            referent_type: Some("educational-consultant".to_string()),
            role: Some("Leading Aftercare".to_string()),
            last_contact_date: Some("2025-03-10".to_string()),
            next_contact_date: None,
        };
        let update = params.validate().unwrap();
        assert_eq!(update.referent_type, Some(ReferentType::EducationalConsultant));
        assert_eq!(update.role, Some(ReferentRole::LeadingAftercare));
        assert_eq!(update.last_contact_date, Some(jiff::civil::date(2025, 3, 10)));
    }

    #[test]
    fn task_priority_defaults_to_medium() {
        let params = AddTask {
            client_id: 1,
            text: "call insurance".to_string(),
            priority: None,
        };
        assert_eq!(params.validate().unwrap(), TaskPriority::Medium);

        let params = AddTask {
            priority: Some("high".to_string()),
            ..params
        };
        assert_eq!(params.validate().unwrap(), TaskPriority::High);
    }
}
