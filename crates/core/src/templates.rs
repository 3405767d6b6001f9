//! Prompt templates and the response selector.
//!
//! Templated prompts draw from a small pool of semantically equivalent
//! paraphrases; the RNG is injectable so tests can assert against the pool
//! rather than one string. Fallbacks for collaborator failure are
//! deterministic per context tag.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::goal::GoalContext;
use crate::flow::states::{ConversationState, PersonaTag, TurnDirective};

/// Kinds of templated prompt the flow can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    Greeting,
    AskIntent,
    AskGoal,
    AskImportance,
    AskTimeline,
    AskPreferences,
    AskConfirmation,
}

/// Fixed single-wording replies for flow control events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixedReply {
    FlowAbandoned,
    ConfirmationDeclined,
    PlanAcknowledged,
    SequenceRestarted,
}

impl FixedReply {
    pub fn message(&self) -> &'static str {
        match self {
            Self::FlowAbandoned => {
                "No problem! Let's chat about something else. What's on your mind?"
            }
            Self::ConfirmationDeclined => {
                "No problem! Let me ask you a few more questions to better understand your goal."
            }
            Self::PlanAcknowledged => {
                "Perfect! I'm generating your personalized plan now. It will include specific \
                 steps, a timeline, and resources tailored to your goal."
            }
            Self::SequenceRestarted => {
                "Let's take it from the top so I get this right. What's your main goal right now?"
            }
        }
    }
}

/// The full paraphrase pool for one prompt kind. Public so tests can assert
/// pool membership instead of pinning a seed-dependent string.
pub fn paraphrases(kind: PromptKind) -> &'static [&'static str] {
    match kind {
        PromptKind::Greeting => &[
            "Hey there! What's on your mind today?",
            "Hi! Ready to work on a goal, or just here to chat?",
            "Hello! What would you like to work on?",
        ],
        PromptKind::AskIntent => &[
            "Are you looking to achieve a goal or just chat for now?",
            "Want to set a goal, or explore some productivity tips?",
            "Are you here to plan something, or just have a conversation?",
        ],
        PromptKind::AskGoal => &[
            "What's your main goal right now?",
            "What are you looking to achieve?",
            "What's the big thing you want to work on?",
        ],
        PromptKind::AskImportance => &[
            "Love that. Why is this important to you right now?",
            "Nice goal. What's driving you to work on this?",
            "What makes this meaningful to you right now?",
        ],
        PromptKind::AskTimeline => &[
            "Want a 7-day, 14-day, 1-month, or 6-month plan for it?",
            "What's your timeline - a quick sprint or a longer journey?",
            "How long do you want to work on this - weeks or months?",
        ],
        PromptKind::AskPreferences => &[
            "Anything I should know, like your schedule or what you enjoy?",
            "Tell me about your current routine or what works for you.",
            "What's your typical day like? Any preferences I should know about?",
        ],
        PromptKind::AskConfirmation => &[
            "Ready to build your plan?",
            "Want me to create a personalized plan for this?",
            "Should I put together your plan now?",
        ],
    }
}

/// Slot-specific clarification for unclear input. Deterministic; repeats the
/// pending question without advancing the sequence.
pub fn clarification(state: &ConversationState, goal: &str) -> String {
    let goal = if goal.trim().is_empty() { "your goal" } else { goal.trim() };
    match state {
        ConversationState::AwaitingGoal => {
            "What's your main goal right now? Just tell me what you want to achieve.".to_string()
        }
        ConversationState::AwaitingImportance => {
            format!("Why is '{goal}' important to you right now? What's driving you?")
        }
        ConversationState::AwaitingTimeline => {
            "Got it. What's your timeline - 7 days, 14 days, 1 month, or 6 months?".to_string()
        }
        ConversationState::AwaitingPreferences => {
            "Anything I should know about your schedule or preferences?".to_string()
        }
        ConversationState::AwaitingConfirmation => {
            format!("Ready to build your plan for '{goal}'? Just say yes!")
        }
        _ => GENERIC_FALLBACK.to_string(),
    }
}

pub const GENERIC_FALLBACK: &str =
    "I'm here to help you achieve your goals! What would you like to work on?";

/// Deterministic substitute reply when the generation collaborator fails or
/// times out. Chosen by context tag (and input length for casual chat), so
/// the conversation continues without exposing the failure.
pub fn generation_fallback(tag: PersonaTag, user_text: &str) -> &'static str {
    match tag {
        PersonaTag::CasualChat if user_text.trim().chars().count() <= 3 => {
            "I'm here to help! What would you like to work on today? You can tell me about a \
             goal, ask for productivity tips, or just chat."
        }
        PersonaTag::CasualChat => {
            "That's interesting! Tell me more about what you'd like to work on or how I can help \
             you."
        }
        PersonaTag::ProductivityCoaching => {
            "I'd be happy to help with productivity! What would you like to improve - time \
             management, focus, habits, or something else?"
        }
        PersonaTag::Scheduling => {
            "I can help you with scheduling and time management! What kind of schedule are you \
             looking to create?"
        }
    }
}

/// Recap of the collected context, emitted when the user confirms.
pub fn confirmation_summary(context: &GoalContext) -> String {
    let timeline = context.timeline.unwrap_or_default();
    format!(
        "Perfect! Here's what I understand:\n\n\
         - Goal: {}\n\
         - Why it matters: {}\n\
         - Timeline: {}\n\
         - Your style: {}\n\n\
         Ready to build your personalized plan?",
        context.goal, context.importance, timeline.label(), context.preferences
    )
}

/// Picks concrete reply text for a flow directive. Free-form directives
/// return `None`; they belong to the generation collaborator.
pub struct ResponseSelector {
    rng: StdRng,
}

impl ResponseSelector {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn prompt(&mut self, kind: PromptKind) -> String {
        let pool = paraphrases(kind);
        pool.choose(&mut self.rng).copied().unwrap_or(GENERIC_FALLBACK).to_string()
    }

    pub fn render(
        &mut self,
        directive: &TurnDirective,
        context: &GoalContext,
    ) -> Option<String> {
        match directive {
            TurnDirective::Prompt(kind) => Some(self.prompt(*kind)),
            TurnDirective::Clarify(state) => Some(clarification(state, &context.goal)),
            TurnDirective::Summary => Some(confirmation_summary(context)),
            TurnDirective::Fixed(reply) => Some(reply.message().to_string()),
            TurnDirective::FreeForm(_) => None,
        }
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        confirmation_summary, generation_fallback, paraphrases, PromptKind, ResponseSelector,
    };
    use crate::domain::goal::{GoalContext, Timeline};
    use crate::flow::states::PersonaTag;

    #[test]
    fn prompts_always_come_from_the_paraphrase_pool() {
        let mut selector = ResponseSelector::seeded(7);
        for _ in 0..20 {
            let prompt = selector.prompt(PromptKind::AskTimeline);
            assert!(paraphrases(PromptKind::AskTimeline).contains(&prompt.as_str()));
        }
    }

    #[test]
    fn seeded_selectors_are_reproducible() {
        let mut first = ResponseSelector::seeded(42);
        let mut second = ResponseSelector::seeded(42);
        for _ in 0..10 {
            assert_eq!(first.prompt(PromptKind::AskGoal), second.prompt(PromptKind::AskGoal));
        }
    }

    #[test]
    fn fallbacks_are_deterministic_per_tag() {
        assert_eq!(
            generation_fallback(PersonaTag::CasualChat, "hm"),
            generation_fallback(PersonaTag::CasualChat, "ok")
        );
        assert_ne!(
            generation_fallback(PersonaTag::CasualChat, "hm"),
            generation_fallback(PersonaTag::CasualChat, "tell me something interesting")
        );
        assert!(generation_fallback(PersonaTag::Scheduling, "anything").contains("scheduling"));
    }

    #[test]
    fn summary_recaps_every_collected_field() {
        let context = GoalContext {
            goal: "learn Python".to_string(),
            importance: "for my career".to_string(),
            timeline: Some(Timeline::OneMonth),
            preferences: "I study at night".to_string(),
            confirmed: true,
        };
        let summary = confirmation_summary(&context);
        assert!(summary.contains("learn Python"));
        assert!(summary.contains("for my career"));
        assert!(summary.contains("1 month"));
        assert!(summary.contains("I study at night"));
    }
}
