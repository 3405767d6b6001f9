//! Conversation and planning domain for stride.
//!
//! Everything in this crate is pure and synchronous: the intent classifier,
//! the slot extractors, the response templates, and the conversation state
//! machine that drives a goal-planning dialogue from greeting to a
//! confirmed goal context. Collaborators with latency (free-form
//! generation, plan synthesis) live behind the seams in `stride-agent`.

pub mod config;
pub mod domain;
pub mod flow;
pub mod intent;
pub mod slots;
pub mod templates;
pub mod text;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LlmProvider, LoadOptions, LogFormat};
pub use domain::goal::{
    GoalContext, PlanHorizon, ReminderCadence, Seriousness, Timeline, ValidatedGoal,
};
pub use domain::history::{ChatHistory, ChatTurn, Role, GENERATION_WINDOW};
pub use domain::plan::{
    EnergyLevel, Plan, PlanMetadata, PlanParseError, Priority, ReminderSettings, Resource, Task,
    TaskReminder, Week,
};
pub use flow::{ChatFlow, ConversationState, PersonaTag, TurnDirective};
pub use intent::{Intent, IntentClassifier};
pub use slots::Feature;
pub use templates::{FixedReply, PromptKind, ResponseSelector};
