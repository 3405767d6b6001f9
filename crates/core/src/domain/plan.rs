use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::goal::{ReminderCadence, Seriousness, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReminder {
    pub enabled: bool,
    pub time: String,
    pub frequency: ReminderCadence,
    pub message: String,
}

/// One actionable item inside a plan week. The planner collaborator only
/// fills `day` and `task`; every other field is attached by an enrichment
/// pass and stays absent until then.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub day: String,
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpful_tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<TaskReminder>,
}

impl Task {
    pub fn new(day: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            task: task.into(),
            time_block: None,
            estimated_duration: None,
            priority: None,
            energy_level: None,
            resources: Vec::new(),
            resource_category: None,
            helpful_tip: None,
            reminder: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub week: u32,
    pub tasks: Vec<Task>,
}

/// Plan-level reminder settings attached by the reminder enrichment pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub default_time: String,
    pub frequency: ReminderCadence,
    pub notification_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub goal: String,
    pub timeline: Timeline,
    pub seriousness: Seriousness,
    pub reminders: ReminderCadence,
    pub created_at: DateTime<Utc>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_settings: Option<ReminderSettings>,
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            goal: String::new(),
            timeline: Timeline::default(),
            seriousness: Seriousness::default(),
            reminders: ReminderCadence::default(),
            created_at: Utc::now(),
            model: String::new(),
            error: None,
            note: None,
            reminder_settings: None,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlanParseError {
    #[error("planner output is not valid JSON: {0}")]
    Malformed(String),
    #[error("planner output contains no weeks")]
    EmptyPlan,
}

/// The structured weekly/daily output of plan synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub metadata: PlanMetadata,
}

impl Plan {
    /// Parses the synthesis collaborator's raw output. Malformed output is a
    /// recoverable condition reported to the caller, never a panic.
    pub fn from_planner_output(raw: &str) -> Result<Self, PlanParseError> {
        let plan: Self = serde_json::from_str(raw.trim())
            .map_err(|error| PlanParseError::Malformed(error.to_string()))?;
        if plan.weeks.is_empty() {
            return Err(PlanParseError::EmptyPlan);
        }
        Ok(plan)
    }

    pub fn total_tasks(&self) -> usize {
        self.weeks.iter().map(|week| week.tasks.len()).sum()
    }

    /// Human-readable digest of the plan, shown once synthesis completes.
    pub fn summary(&self) -> String {
        let metadata = &self.metadata;
        let mut lines = vec![
            "## Your Personalized Plan".to_string(),
            String::new(),
            format!("**Goal:** {}", metadata.goal),
            format!("**Timeline:** {} weeks", self.weeks.len()),
            format!("**Total Tasks:** {} tasks", self.total_tasks()),
            format!("**Commitment Level:** {}", metadata.seriousness.label()),
        ];
        if let Some(error) = &metadata.error {
            lines.push(String::new());
            lines.push(format!("Note: plan generation hit a problem ({error}); this is a simplified plan."));
        }
        lines.join("\n")
    }
}
