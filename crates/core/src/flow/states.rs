use serde::{Deserialize, Serialize};

use crate::templates::{FixedReply, PromptKind};

/// The stage a conversation session is in. Exactly one is current at any
/// time; transitions are owned by [`crate::flow::engine::ChatFlow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Greeting,
    AwaitingIntent,
    AwaitingGoal,
    AwaitingImportance,
    AwaitingTimeline,
    AwaitingPreferences,
    AwaitingConfirmation,
    ReadyToGeneratePlan,
    CasualChat,
    ProductivityCoaching,
    Scheduling,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::AwaitingIntent => "awaiting_intent",
            Self::AwaitingGoal => "awaiting_goal",
            Self::AwaitingImportance => "awaiting_importance",
            Self::AwaitingTimeline => "awaiting_timeline",
            Self::AwaitingPreferences => "awaiting_preferences",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::ReadyToGeneratePlan => "ready_to_generate_plan",
            Self::CasualChat => "casual_chat",
            Self::ProductivityCoaching => "productivity_coaching",
            Self::Scheduling => "scheduling",
        }
    }

    /// Recovers a state from a persisted label. Unknown labels resolve to
    /// the nearest safe default instead of propagating as a failure.
    pub fn from_persisted(raw: &str) -> Self {
        match raw.trim() {
            "greeting" => Self::Greeting,
            "awaiting_intent" => Self::AwaitingIntent,
            "awaiting_goal" => Self::AwaitingGoal,
            "awaiting_importance" => Self::AwaitingImportance,
            "awaiting_timeline" => Self::AwaitingTimeline,
            "awaiting_preferences" => Self::AwaitingPreferences,
            "awaiting_confirmation" => Self::AwaitingConfirmation,
            "ready_to_generate_plan" => Self::ReadyToGeneratePlan,
            "productivity_coaching" => Self::ProductivityCoaching,
            "scheduling" => Self::Scheduling,
            _ => Self::CasualChat,
        }
    }

    /// True for the five slot-collection stages.
    pub fn in_goal_sequence(&self) -> bool {
        matches!(
            self,
            Self::AwaitingGoal
                | Self::AwaitingImportance
                | Self::AwaitingTimeline
                | Self::AwaitingPreferences
                | Self::AwaitingConfirmation
        )
    }
}

/// Persona used when a turn is delegated to free-form generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaTag {
    CasualChat,
    ProductivityCoaching,
    Scheduling,
}

impl PersonaTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CasualChat => "casual_chat",
            Self::ProductivityCoaching => "productivity_coaching",
            Self::Scheduling => "scheduling",
        }
    }
}

/// What the flow decided a turn needs: a templated prompt, a slot
/// clarification, a context recap, a fixed control reply, or a hand-off to
/// the free-form generation collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDirective {
    Prompt(PromptKind),
    Clarify(ConversationState),
    FreeForm(PersonaTag),
    Summary,
    Fixed(FixedReply),
}

#[cfg(test)]
mod tests {
    use super::ConversationState;

    #[test]
    fn persisted_labels_round_trip() {
        for state in [
            ConversationState::Greeting,
            ConversationState::AwaitingTimeline,
            ConversationState::ReadyToGeneratePlan,
            ConversationState::Scheduling,
        ] {
            assert_eq!(ConversationState::from_persisted(state.as_str()), state);
        }
    }

    #[test]
    fn unknown_persisted_label_recovers_to_casual_chat() {
        assert_eq!(
            ConversationState::from_persisted("awaiting_budget"),
            ConversationState::CasualChat
        );
        assert_eq!(ConversationState::from_persisted(""), ConversationState::CasualChat);
    }

    #[test]
    fn goal_sequence_membership() {
        assert!(ConversationState::AwaitingGoal.in_goal_sequence());
        assert!(ConversationState::AwaitingConfirmation.in_goal_sequence());
        assert!(!ConversationState::CasualChat.in_goal_sequence());
        assert!(!ConversationState::ReadyToGeneratePlan.in_goal_sequence());
    }
}
