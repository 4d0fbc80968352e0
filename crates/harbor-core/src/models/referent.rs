//! Referent contact record.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Contact-role record attached 1:1 to a client plan.
///
/// Always present on the plan (empty by default) and mutated field by field;
/// it has no lifecycle of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Referent {
    /// Referent display name
    #[serde(default)]
    pub name: Option<String>,

    /// Professional relationship to the client
    #[serde(default, rename = "type")]
    pub referent_type: Option<ReferentType>,

    /// Role the referent plays in aftercare planning
    #[serde(default)]
    pub role: Option<ReferentRole>,

    /// Date of the most recent contact
    #[serde(default)]
    pub last_contact_date: Option<Date>,

    /// Date of the next planned contact
    #[serde(default)]
    pub next_contact_date: Option<Date>,
}

/// Professional category of a referent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReferentType {
    #[serde(rename = "Educational Consultant")]
    EducationalConsultant,
    Therapist,
    Psychiatrist,
    #[serde(rename = "Probation Officer")]
    ProbationOfficer,
    #[serde(rename = "Family Friend")]
    FamilyFriend,
    Other,
}

impl ReferentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentType::EducationalConsultant => "Educational Consultant",
            ReferentType::Therapist => "Therapist",
            ReferentType::Psychiatrist => "Psychiatrist",
            ReferentType::ProbationOfficer => "Probation Officer",
            ReferentType::FamilyFriend => "Family Friend",
            ReferentType::Other => "Other",
        }
    }
}

impl FromStr for ReferentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "educationalconsultant" => Ok(ReferentType::EducationalConsultant),
            "therapist" => Ok(ReferentType::Therapist),
            "psychiatrist" => Ok(ReferentType::Psychiatrist),
            "probationofficer" => Ok(ReferentType::ProbationOfficer),
            "familyfriend" => Ok(ReferentType::FamilyFriend),
            "other" => Ok(ReferentType::Other),
            _ => Err(format!("Invalid referent type: {s}")),
        }
    }
}

/// Role a referent plays in aftercare coordination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReferentRole {
    #[serde(rename = "Leading Aftercare")]
    LeadingAftercare,
    #[serde(rename = "Handling Options")]
    HandlingOptions,
    Both,
    Observing,
}

impl ReferentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentRole::LeadingAftercare => "Leading Aftercare",
            ReferentRole::HandlingOptions => "Handling Options",
            ReferentRole::Both => "Both",
            ReferentRole::Observing => "Observing",
        }
    }
}

impl FromStr for ReferentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "leadingaftercare" => Ok(ReferentRole::LeadingAftercare),
            "handlingoptions" => Ok(ReferentRole::HandlingOptions),
            "both" => Ok(ReferentRole::Both),
            "observing" => Ok(ReferentRole::Observing),
            _ => Err(format!("Invalid referent role: {s}")),
        }
    }
}
