use serde::{Deserialize, Serialize};

/// Fallback goal text used when validation sees an empty goal.
pub const DEFAULT_GOAL: &str = "Improve productivity";

/// Importance backfilled when a shortcut path skipped the question.
pub const DEFAULT_IMPORTANCE: &str = "personal growth";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "7_days")]
    SevenDays,
    #[serde(rename = "14_days")]
    FourteenDays,
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "6_months")]
    SixMonths,
}

impl Timeline {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SevenDays => "7 days",
            Self::FourteenDays => "14 days",
            Self::OneMonth => "1 month",
            Self::SixMonths => "6 months",
        }
    }

    pub fn horizon(&self) -> PlanHorizon {
        match self {
            Self::SevenDays | Self::FourteenDays => PlanHorizon::Short,
            Self::OneMonth => PlanHorizon::Medium,
            Self::SixMonths => PlanHorizon::Long,
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::OneMonth
    }
}

/// Coarse plan horizon derived from the timeline bucket. Drives the size of
/// deterministic fallback plans and the timeframe wording in synthesis
/// requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanHorizon {
    Short,
    Medium,
    Long,
}

impl PlanHorizon {
    pub fn fallback_weeks(&self) -> u32 {
        match self {
            Self::Short => 2,
            Self::Medium => 4,
            Self::Long => 6,
        }
    }

    pub fn timeframe(&self) -> &'static str {
        match self {
            Self::Short => "2-4 weeks",
            Self::Medium => "1-3 months",
            Self::Long => "3-6 months",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seriousness {
    Low,
    Medium,
    High,
}

impl Seriousness {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Plan-complexity wording passed to the synthesis collaborator.
    pub fn complexity(&self) -> &'static str {
        match self {
            Self::Low => "simple, easy-to-follow steps",
            Self::Medium => "a balanced approach with moderate complexity",
            Self::High => "a comprehensive, detailed plan with advanced strategies",
        }
    }
}

impl Default for Seriousness {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCadence {
    Daily,
    Weekly,
}

impl ReminderCadence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Daily => "daily check-ins and progress tracking",
            Self::Weekly => "weekly progress reviews and adjustments",
        }
    }
}

impl Default for ReminderCadence {
    fn default() -> Self {
        Self::Weekly
    }
}

/// The structured record a planning session accumulates slot by slot.
///
/// Owned exclusively by the conversation flow for the lifetime of one
/// session. `confirmed` is only ever set through [`GoalContext::confirm`],
/// which backfills the one slot the shortcut paths may skip, so
/// `confirmed == true` implies every field is populated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalContext {
    pub goal: String,
    pub importance: String,
    pub timeline: Option<Timeline>,
    pub preferences: String,
    pub confirmed: bool,
}

impl GoalContext {
    pub fn is_complete(&self) -> bool {
        !self.goal.trim().is_empty()
            && !self.importance.trim().is_empty()
            && self.timeline.is_some()
            && !self.preferences.trim().is_empty()
    }

    /// Marks the context confirmed. An importance left empty by a shortcut
    /// path is backfilled here so the completeness invariant holds.
    pub fn confirm(&mut self) {
        if self.importance.trim().is_empty() {
            self.importance = DEFAULT_IMPORTANCE.to_string();
        }
        self.confirmed = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Normalizes the context for plan synthesis. Substitutes defaults for
    /// anything unset instead of failing: an empty goal becomes a canonical
    /// placeholder, a missing timeline the medium bucket, and seriousness is
    /// derived from whether the flow was confirmed.
    pub fn validated(&self) -> ValidatedGoal {
        let goal = self.goal.trim();
        ValidatedGoal {
            goal: if goal.is_empty() { DEFAULT_GOAL.to_string() } else { goal.to_string() },
            timeline: self.timeline.unwrap_or_default(),
            seriousness: if self.confirmed { Seriousness::High } else { Seriousness::Medium },
            reminders: ReminderCadence::default(),
        }
    }
}

/// A goal context after validation: every field concrete, ready to be turned
/// into a synthesis request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedGoal {
    pub goal: String,
    pub timeline: Timeline,
    pub seriousness: Seriousness,
    pub reminders: ReminderCadence,
}

#[cfg(test)]
mod tests {
    use super::{GoalContext, PlanHorizon, ReminderCadence, Seriousness, Timeline, DEFAULT_GOAL};

    #[test]
    fn timeline_buckets_map_to_horizons() {
        assert_eq!(Timeline::SevenDays.horizon(), PlanHorizon::Short);
        assert_eq!(Timeline::FourteenDays.horizon(), PlanHorizon::Short);
        assert_eq!(Timeline::OneMonth.horizon(), PlanHorizon::Medium);
        assert_eq!(Timeline::SixMonths.horizon(), PlanHorizon::Long);
        assert_eq!(PlanHorizon::Long.fallback_weeks(), 6);
    }

    #[test]
    fn timeline_serializes_with_bucket_names() {
        let json = serde_json::to_string(&Timeline::FourteenDays).expect("serialize timeline");
        assert_eq!(json, "\"14_days\"");
        let parsed: Timeline = serde_json::from_str("\"6_months\"").expect("parse timeline");
        assert_eq!(parsed, Timeline::SixMonths);
    }

    #[test]
    fn validation_substitutes_defaults_for_empty_context() {
        let validated = GoalContext::default().validated();
        assert_eq!(validated.goal, DEFAULT_GOAL);
        assert_eq!(validated.timeline, Timeline::OneMonth);
        assert_eq!(validated.seriousness, Seriousness::Medium);
        assert_eq!(validated.reminders, ReminderCadence::Weekly);
    }

    #[test]
    fn confirmed_context_is_treated_as_high_commitment() {
        let mut context = GoalContext {
            goal: "learn rust".to_string(),
            importance: "career switch".to_string(),
            timeline: Some(Timeline::SixMonths),
            preferences: "evenings".to_string(),
            confirmed: false,
        };
        context.confirm();
        assert!(context.confirmed);
        assert_eq!(context.validated().seriousness, Seriousness::High);
    }

    #[test]
    fn confirm_backfills_skipped_importance() {
        let mut context = GoalContext {
            goal: "learn rust".to_string(),
            timeline: Some(Timeline::OneMonth),
            preferences: "mornings".to_string(),
            ..GoalContext::default()
        };
        context.confirm();
        assert!(context.is_complete());
        assert!(!context.importance.is_empty());
    }
}
