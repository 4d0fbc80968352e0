//! Follow-up task model.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A free-form follow-up task attached to a client plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Identifier, unique within one plan
    pub id: u64,

    /// Task text
    pub text: String,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,

    /// Informational priority
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Informational priority of a follow-up task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    /// Convert to the document string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            _ => Err(format!("Invalid task priority: {s}")),
        }
    }
}
