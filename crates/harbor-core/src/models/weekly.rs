//! Weekly case-review update fields.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The four weekly update fields tracked during case review.
///
/// Serialized keys match the upstream document shape.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum FieldKey {
    /// Progress made this week
    #[serde(rename = "weeklyProgress")]
    Progress,
    /// Current obstacles or roadblocks
    #[serde(rename = "weeklyObstacles")]
    Obstacles,
    /// Goals for next week
    #[serde(rename = "nextWeekPlan")]
    NextWeekPlan,
    /// Family discussions and updates (informational only)
    #[serde(rename = "familyUpdates")]
    FamilyCommunication,
}

impl FieldKey {
    /// All tracked fields, in display order.
    pub fn all() -> [FieldKey; 4] {
        [
            FieldKey::Progress,
            FieldKey::Obstacles,
            FieldKey::NextWeekPlan,
            FieldKey::FamilyCommunication,
        ]
    }

    /// Document key for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Progress => "weeklyProgress",
            FieldKey::Obstacles => "weeklyObstacles",
            FieldKey::NextWeekPlan => "nextWeekPlan",
            FieldKey::FamilyCommunication => "familyUpdates",
        }
    }

    /// Display label for this field.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Progress => "This Week's Progress",
            FieldKey::Obstacles => "Current Obstacles",
            FieldKey::NextWeekPlan => "Next Week's Plan",
            FieldKey::FamilyCommunication => "Family Communication",
        }
    }

    /// Whether a stale value should gate the weekly review. The family
    /// communication field is informational only.
    pub fn required(&self) -> bool {
        !matches!(self, FieldKey::FamilyCommunication)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "weeklyprogress" | "progress" => Ok(FieldKey::Progress),
            "weeklyobstacles" | "obstacles" => Ok(FieldKey::Obstacles),
            "nextweekplan" => Ok(FieldKey::NextWeekPlan),
            "familyupdates" | "familycommunication" => Ok(FieldKey::FamilyCommunication),
            _ => Err(format!("Invalid weekly update field: {s}")),
        }
    }
}

/// One weekly update field value with its freshness stamp.
///
/// The text and the timestamp only ever change together (see
/// [`crate::weekly::write`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyUpdate {
    /// Free-text field content
    #[serde(default)]
    pub text: String,

    /// When the text was last written; `None` if never written
    #[serde(default)]
    pub last_updated_at: Option<Timestamp>,
}

/// All weekly update fields for one client, keyed by field.
pub type WeeklyUpdates = BTreeMap<FieldKey, WeeklyUpdate>;
