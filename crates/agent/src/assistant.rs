use uuid::Uuid;

use stride_core::config::{AppConfig, LlmConfig};
use stride_core::domain::goal::GoalContext;
use stride_core::domain::history::{ChatHistory, GENERATION_WINDOW};
use stride_core::flow::engine::ChatFlow;
use stride_core::flow::states::{ConversationState, PersonaTag, TurnDirective};
use stride_core::templates::{self, PromptKind, ResponseSelector};

use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::personas;

/// Snapshot of a session's operational state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthStatus {
    pub generation_configured: bool,
    pub history_turns: usize,
    pub state: ConversationState,
}

/// One conversation session: the state machine, its transcript, and the
/// generation collaborator behind it.
///
/// Turns are processed strictly sequentially; independent sessions get
/// independent instances, so no locking is needed anywhere in here.
pub struct Assistant<C> {
    session_id: Uuid,
    flow: ChatFlow,
    history: ChatHistory,
    selector: ResponseSelector,
    client: C,
    llm: LlmConfig,
}

impl<C> Assistant<C>
where
    C: LlmClient,
{
    pub fn new(client: C, config: &AppConfig) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            flow: ChatFlow::new(),
            history: ChatHistory::new(),
            selector: ResponseSelector::new(),
            client,
            llm: config.llm.clone(),
        }
    }

    /// Variant with a pinned template RNG, for reproducible sessions.
    pub fn seeded(client: C, config: &AppConfig, seed: u64) -> Self {
        Self { selector: ResponseSelector::seeded(seed), ..Self::new(client, config) }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> ConversationState {
        self.flow.state()
    }

    pub fn goal_context(&self) -> &GoalContext {
        self.flow.context()
    }

    pub fn chat_history(&self) -> &ChatHistory {
        &self.history
    }

    /// Opening message for a fresh session, recorded in the transcript.
    pub fn greeting(&mut self) -> String {
        let text = self.selector.prompt(PromptKind::Greeting);
        self.history.push_assistant(&text);
        text
    }

    /// Processes one user turn: advances the state machine, renders or
    /// generates the reply, and appends both sides to the transcript.
    ///
    /// Collaborator failures never escape: the reply degrades to the
    /// context-tagged fallback string and the conversation continues.
    pub async fn handle_turn(&mut self, text: &str) -> String {
        let directive = self.flow.advance(text);

        // Snapshot before appending so the window excludes the turn that is
        // passed separately as the current message.
        let recent: Vec<ChatMessage> =
            self.history.recent(GENERATION_WINDOW).iter().map(ChatMessage::from).collect();
        self.history.push_user(text);

        let reply = match directive {
            TurnDirective::FreeForm(tag) => self.free_form_reply(tag, text, recent).await,
            other => self
                .selector
                .render(&other, self.flow.context())
                .unwrap_or_else(|| templates::GENERIC_FALLBACK.to_string()),
        };

        self.history.push_assistant(&reply);
        reply
    }

    /// True once the collected context is confirmed and the host should
    /// invoke plan synthesis (exactly once per completed flow).
    pub fn is_ready_for_plan(&self) -> bool {
        self.flow.is_ready_for_plan()
    }

    /// The finalized context, available while the session is ready.
    pub fn finalize_goal_context(&self) -> Option<GoalContext> {
        self.is_ready_for_plan().then(|| self.flow.context().clone())
    }

    /// Returns the session to casual chat after the host generated a plan.
    pub fn conclude_planning(&mut self) {
        self.flow.conclude_planning();
    }

    pub fn reset(&mut self) {
        self.flow.reset();
        self.history.clear();
    }

    pub fn health_check(&self) -> HealthStatus {
        HealthStatus {
            generation_configured: self.client.is_configured(),
            history_turns: self.history.len(),
            state: self.flow.state(),
        }
    }

    async fn free_form_reply(
        &self,
        tag: PersonaTag,
        user_text: &str,
        recent: Vec<ChatMessage>,
    ) -> String {
        let mut messages = vec![ChatMessage::system(personas::system_prompt(tag))];
        messages.extend(recent);
        messages.push(ChatMessage::user(user_text));

        let request = CompletionRequest {
            messages,
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
        };

        match self.client.complete(request).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(
                    event_name = "assistant.generation_fallback",
                    session_id = %self.session_id,
                    persona = tag.as_str(),
                    error = %error,
                    "free-form generation failed; substituting fallback reply"
                );
                templates::generation_fallback(tag, user_text).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Assistant;
    use crate::llm::{OfflineLlmClient, StaticLlmClient};
    use stride_core::config::AppConfig;
    use stride_core::flow::states::{ConversationState, PersonaTag};
    use stride_core::templates::{self, paraphrases, PromptKind};

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[tokio::test]
    async fn free_form_turns_use_the_collaborator_reply() {
        let client = StaticLlmClient::with_reply("Happy to chat about that.");
        let mut assistant = Assistant::seeded(client, &config(), 1);

        let reply = assistant.handle_turn("tell me about your day").await;
        assert_eq!(reply, "Happy to chat about that.");
        assert_eq!(assistant.state(), ConversationState::CasualChat);
        assert_eq!(assistant.chat_history().len(), 2);
    }

    #[tokio::test]
    async fn generation_failure_substitutes_fallback_and_keeps_state() {
        let mut assistant = Assistant::seeded(OfflineLlmClient, &config(), 1);

        let reply = assistant.handle_turn("tell me about rust").await;
        assert_eq!(
            reply,
            templates::generation_fallback(PersonaTag::CasualChat, "tell me about rust")
        );
        assert_eq!(assistant.state(), ConversationState::CasualChat);

        // The conversation keeps going after the failure.
        let reply = assistant.handle_turn("hm").await;
        assert_eq!(reply, templates::generation_fallback(PersonaTag::CasualChat, "hm"));
    }

    #[tokio::test]
    async fn templated_replies_come_from_the_paraphrase_pool() {
        let mut assistant = Assistant::seeded(OfflineLlmClient, &config(), 42);

        let greeting = assistant.greeting();
        assert!(paraphrases(PromptKind::Greeting).contains(&greeting.as_str()));

        let reply = assistant.handle_turn("hi").await;
        assert!(paraphrases(PromptKind::AskIntent).contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn scripted_session_finalizes_exactly_one_context() {
        let mut assistant = Assistant::seeded(OfflineLlmClient, &config(), 7);

        assistant.handle_turn("hi").await;
        assistant.handle_turn("I want to learn Python").await;
        assistant.handle_turn("for my career").await;
        assistant.handle_turn("1 month").await;
        assistant.handle_turn("I study at night").await;
        let summary = assistant.handle_turn("yes").await;

        assert!(summary.contains("I want to learn Python"));
        assert!(assistant.is_ready_for_plan());

        let context = assistant.finalize_goal_context().expect("ready context");
        assert!(context.confirmed);
        assert!(context.is_complete());

        assistant.conclude_planning();
        assert_eq!(assistant.state(), ConversationState::CasualChat);
        assert!(assistant.finalize_goal_context().is_none());
    }

    #[tokio::test]
    async fn reset_clears_transcript_and_flow() {
        let mut assistant = Assistant::seeded(OfflineLlmClient, &config(), 7);
        assistant.handle_turn("hi").await;
        assistant.handle_turn("I want to learn Python").await;

        assistant.reset();
        assert_eq!(assistant.state(), ConversationState::Greeting);
        assert!(assistant.chat_history().is_empty());
        assert!(assistant.goal_context().goal.is_empty());
    }

    #[tokio::test]
    async fn health_check_reflects_collaborator_configuration() {
        let mut assistant = Assistant::seeded(OfflineLlmClient, &config(), 7);
        assistant.handle_turn("hi").await;

        let health = assistant.health_check();
        assert!(!health.generation_configured);
        assert_eq!(health.history_turns, 2);
        assert_eq!(health.state, ConversationState::AwaitingIntent);
    }
}
