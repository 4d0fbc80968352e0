//! Shortlist entry model.

use serde::{Deserialize, Serialize};

use super::PlacementStatus;

/// One candidate placement on a client's shortlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistEntry {
    /// Identifier of the candidate program
    pub program_id: String,

    /// Program display name, captured at add time (the directory is never
    /// re-queried afterwards)
    pub program_name: String,

    /// Current placement status
    #[serde(default)]
    pub status: PlacementStatus,

    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

/// A resolved program reference handed to the shortlist at add time.
///
/// The program directory is an external collaborator; callers look a program
/// up there and pass the denormalized id/name pair in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProgramRef {
    /// Identifier of the program in the directory
    pub program_id: String,
    /// Display name, usually "Facility - Program"
    pub program_name: String,
}
