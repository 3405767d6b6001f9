//! Session orchestration and collaborator seams for stride.
//!
//! This crate wires the pure conversation core to everything with latency
//! or failure modes:
//! - `llm` - the `LlmClient` trait plus the OpenAI-compatible HTTP client
//! - `assistant` - per-session façade: `handle_turn`, readiness, finalize
//! - `gateway` - plan synthesis with fallback and error plans
//! - `enrich` - schedule/resource/reminder enrichment collaborators
//!
//! # Failure principle
//!
//! Collaborator failures are recoverable by construction. A failed
//! free-form generation degrades to a deterministic context-tagged
//! fallback string; a failed or unusable synthesis degrades to a
//! deterministic plan. Neither corrupts session state, and nothing in this
//! crate propagates a collaborator error to the host.

pub mod assistant;
pub mod enrich;
pub mod gateway;
pub mod llm;
pub mod personas;

pub use assistant::{Assistant, HealthStatus};
pub use enrich::{
    today_summary, CatalogResourceEnricher, DailyReminderEnricher, ReminderEnricher,
    ResourceEnricher, ScheduleEnricher, SlotScheduleEnricher,
};
pub use gateway::PlanGateway;
pub use llm::{
    resolve_model, ChatMessage, ChatRole, CompletionRequest, GenerationError, HttpLlmClient,
    LlmClient, OfflineLlmClient, StaticLlmClient,
};
