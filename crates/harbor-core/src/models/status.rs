//! Status enumerations for client plans and shortlisted placements.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of client plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Client is in treatment and discharge planning is underway
    #[default]
    Active,

    /// Client has been discharged; the plan is kept for reference
    Discharged,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "discharged" => Ok(PlanStatus::Discharged),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Discharged => "discharged",
        }
    }
}

/// Type-safe enumeration of placement statuses for shortlisted programs.
///
/// The serialized strings match the upstream document vocabulary exactly;
/// there are no other valid values and no automatic transitions between
/// them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PlacementStatus {
    /// Program is being vetted by the clinical team
    #[default]
    Vetting,

    /// Program has been presented to the family for review
    #[serde(rename = "Presented to Family")]
    PresentedToFamily,

    /// An application has been submitted to the program
    #[serde(rename = "Application Submitted")]
    ApplicationSubmitted,

    /// Placement confirmed
    Confirmed,

    /// Program declined the client, or the family declined the program
    Declined,

    /// Client is on the program's waitlist
    Waitlisted,
}

impl FromStr for PlacementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the display strings in any casing, with spaces, hyphens or
        // underscores between words.
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "vetting" => Ok(PlacementStatus::Vetting),
            "presentedtofamily" => Ok(PlacementStatus::PresentedToFamily),
            "applicationsubmitted" => Ok(PlacementStatus::ApplicationSubmitted),
            "confirmed" => Ok(PlacementStatus::Confirmed),
            "declined" => Ok(PlacementStatus::Declined),
            "waitlisted" => Ok(PlacementStatus::Waitlisted),
            _ => Err(format!("Invalid placement status: {s}")),
        }
    }
}

impl PlacementStatus {
    /// Convert to the document string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementStatus::Vetting => "Vetting",
            PlacementStatus::PresentedToFamily => "Presented to Family",
            PlacementStatus::ApplicationSubmitted => "Application Submitted",
            PlacementStatus::Confirmed => "Confirmed",
            PlacementStatus::Declined => "Declined",
            PlacementStatus::Waitlisted => "Waitlisted",
        }
    }
}
