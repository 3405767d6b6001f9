use crate::domain::goal::GoalContext;
use crate::flow::states::{ConversationState, PersonaTag, TurnDirective};
use crate::intent::{self, Intent, IntentClassifier};
use crate::slots;
use crate::templates::{FixedReply, PromptKind};
use crate::text::{contains_any, normalize, tokenize};

/// Message length above which an opening message counts as a detailed goal
/// statement, and above which a timeline answer is re-read as an importance
/// correction.
const DETAILED_THRESHOLD: usize = 5;
const CORRECTION_THRESHOLD: usize = 10;

/// The conversation state machine. Owns the current stage and the goal
/// context for one session and decides, turn by turn, whether to ask a
/// templated question, clarify, recap, or hand the turn to free-form
/// generation.
///
/// `advance` is total: classification ambiguity resolves through documented
/// defaults and unhandled input lands in casual chat, never in an error.
#[derive(Clone, Debug)]
pub struct ChatFlow {
    state: ConversationState,
    context: GoalContext,
    classifier: IntentClassifier,
}

impl ChatFlow {
    pub fn new() -> Self {
        Self {
            state: ConversationState::Greeting,
            context: GoalContext::default(),
            classifier: IntentClassifier::new(),
        }
    }

    /// Rebuilds a flow from persisted session state. Callers recover
    /// unknown state labels through [`ConversationState::from_persisted`]
    /// before getting here, so this constructor is total.
    pub fn resume(state: ConversationState, context: GoalContext) -> Self {
        Self { state, context, classifier: IntentClassifier::new() }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn context(&self) -> &GoalContext {
        &self.context
    }

    /// True once the user has confirmed and plan synthesis may be invoked.
    pub fn is_ready_for_plan(&self) -> bool {
        self.state == ConversationState::ReadyToGeneratePlan && self.context.confirmed
    }

    pub fn reset(&mut self) {
        self.state = ConversationState::Greeting;
        self.context.clear();
    }

    /// Leaves the planning stage after the host has generated a plan,
    /// keeping the collected context for display.
    pub fn conclude_planning(&mut self) {
        if self.state == ConversationState::ReadyToGeneratePlan {
            self.state = ConversationState::CasualChat;
        }
    }

    /// Processes one user turn: updates state and context, and returns the
    /// directive describing the reply.
    pub fn advance(&mut self, text: &str) -> TurnDirective {
        match self.state {
            ConversationState::Greeting => self.on_greeting(text),
            ConversationState::AwaitingIntent => self.on_awaiting_intent(text),
            ConversationState::AwaitingGoal
            | ConversationState::AwaitingImportance
            | ConversationState::AwaitingTimeline
            | ConversationState::AwaitingPreferences
            | ConversationState::AwaitingConfirmation => self.on_goal_sequence(text),
            ConversationState::ReadyToGeneratePlan => self.on_ready(text),
            ConversationState::CasualChat => self.on_casual_chat(text),
            ConversationState::ProductivityCoaching => {
                TurnDirective::FreeForm(PersonaTag::ProductivityCoaching)
            }
            ConversationState::Scheduling => TurnDirective::FreeForm(PersonaTag::Scheduling),
        }
    }

    fn on_greeting(&mut self, text: &str) -> TurnDirective {
        match self.classifier.classify(text) {
            Intent::Greeting => {
                self.state = ConversationState::AwaitingIntent;
                TurnDirective::Prompt(PromptKind::AskIntent)
            }
            Intent::ProductivityCoaching => {
                self.state = ConversationState::ProductivityCoaching;
                TurnDirective::FreeForm(PersonaTag::ProductivityCoaching)
            }
            Intent::CasualChat => {
                self.state = ConversationState::CasualChat;
                TurnDirective::FreeForm(PersonaTag::CasualChat)
            }
            // A sufficiently goal-like opening message becomes the goal
            // itself and the importance question is skipped.
            Intent::GoalPlanning
                if intent::has_goal_keyword(text)
                    && text.trim().chars().count() > DETAILED_THRESHOLD =>
            {
                self.context.goal = text.trim().to_string();
                self.state = ConversationState::AwaitingTimeline;
                TurnDirective::Prompt(PromptKind::AskTimeline)
            }
            _ => {
                self.state = ConversationState::AwaitingIntent;
                TurnDirective::Prompt(PromptKind::AskIntent)
            }
        }
    }

    fn on_awaiting_intent(&mut self, text: &str) -> TurnDirective {
        if intent::matches_goal_creation(text) {
            return self.enter_sequence_with_prefill(text);
        }

        match self.classifier.classify(text) {
            Intent::GoalPlanning => {
                self.context.goal = text.trim().to_string();
                self.state = ConversationState::AwaitingImportance;
                TurnDirective::Prompt(PromptKind::AskImportance)
            }
            Intent::Scheduling => {
                self.state = ConversationState::Scheduling;
                TurnDirective::FreeForm(PersonaTag::Scheduling)
            }
            Intent::ProductivityCoaching => {
                self.state = ConversationState::ProductivityCoaching;
                TurnDirective::FreeForm(PersonaTag::ProductivityCoaching)
            }
            Intent::Greeting | Intent::CasualChat | Intent::Unknown => {
                self.state = ConversationState::CasualChat;
                TurnDirective::FreeForm(PersonaTag::CasualChat)
            }
        }
    }

    fn on_goal_sequence(&mut self, text: &str) -> TurnDirective {
        if slots::is_stop_word(text) {
            // Abandons the sequence; committed fields survive.
            self.state = ConversationState::CasualChat;
            return TurnDirective::Fixed(FixedReply::FlowAbandoned);
        }

        let at_confirmation = self.state == ConversationState::AwaitingConfirmation;
        // Affirmatives like "yes" and "go" are three characters or fewer,
        // so the short-input rule is suspended at the confirmation slot.
        if slots::is_repeat_token(text) || (!at_confirmation && slots::is_short(text)) {
            return TurnDirective::Clarify(self.state);
        }

        match self.state {
            ConversationState::AwaitingGoal => {
                self.context.goal = text.trim().to_string();
                self.state = ConversationState::AwaitingImportance;
                TurnDirective::Prompt(PromptKind::AskImportance)
            }
            ConversationState::AwaitingImportance => {
                self.context.importance = text.trim().to_string();
                self.state = ConversationState::AwaitingTimeline;
                TurnDirective::Prompt(PromptKind::AskTimeline)
            }
            ConversationState::AwaitingTimeline => self.on_timeline_answer(text),
            ConversationState::AwaitingPreferences => {
                self.context.preferences = text.trim().to_string();
                self.state = ConversationState::AwaitingConfirmation;
                TurnDirective::Prompt(PromptKind::AskConfirmation)
            }
            ConversationState::AwaitingConfirmation => self.on_confirmation_answer(text),
            _ => {
                self.state = ConversationState::CasualChat;
                TurnDirective::FreeForm(PersonaTag::CasualChat)
            }
        }
    }

    fn on_timeline_answer(&mut self, text: &str) -> TurnDirective {
        // Long prose without any duration wording is read as a late
        // correction to the importance answer; the timeline question is
        // asked again rather than mis-bucketing the reply.
        if text.trim().chars().count() > CORRECTION_THRESHOLD && !slots::mentions_timeline(text) {
            self.context.importance = text.trim().to_string();
            return TurnDirective::Prompt(PromptKind::AskTimeline);
        }

        self.context.timeline = Some(slots::extract_timeline(text));
        self.state = ConversationState::AwaitingPreferences;
        TurnDirective::Prompt(PromptKind::AskPreferences)
    }

    fn on_confirmation_answer(&mut self, text: &str) -> TurnDirective {
        if slots::extract_confirmation(text) {
            self.context.confirm();
            self.state = ConversationState::ReadyToGeneratePlan;
            TurnDirective::Summary
        } else {
            // Soft decline: restart the questions, keep what was collected.
            self.state = ConversationState::AwaitingGoal;
            TurnDirective::Fixed(FixedReply::ConfirmationDeclined)
        }
    }

    fn on_ready(&mut self, text: &str) -> TurnDirective {
        if slots::extract_confirmation(text) {
            // The host invokes synthesis once on first entry; a repeated
            // affirmative only acknowledges.
            TurnDirective::Fixed(FixedReply::PlanAcknowledged)
        } else {
            self.state = ConversationState::AwaitingGoal;
            TurnDirective::Fixed(FixedReply::SequenceRestarted)
        }
    }

    fn on_casual_chat(&mut self, text: &str) -> TurnDirective {
        if intent::matches_goal_creation(text) {
            return self.enter_sequence_with_prefill(text);
        }
        TurnDirective::FreeForm(PersonaTag::CasualChat)
    }

    /// Explicit "create a goal" requests start the sequence at the timeline
    /// question with a canned goal, skipping the importance step.
    fn enter_sequence_with_prefill(&mut self, text: &str) -> TurnDirective {
        self.context.goal = goal_prefill(text);
        self.state = ConversationState::AwaitingTimeline;
        TurnDirective::Prompt(PromptKind::AskTimeline)
    }
}

impl Default for ChatFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn goal_prefill(text: &str) -> String {
    const ALGORITHM_HINTS: &[&str] = &["dsa", "data structures", "algorithms"];

    let normalized = normalize(text);
    let tokens = tokenize(&normalized);
    if contains_any(&normalized, &tokens, ALGORITHM_HINTS) {
        "Learn Data Structures and Algorithms".to_string()
    } else {
        "your goal".to_string()
    }
}
