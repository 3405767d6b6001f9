use chrono::Utc;

use stride_core::config::{AppConfig, PlannerConfig};
use stride_core::domain::goal::{GoalContext, ValidatedGoal};
use stride_core::domain::plan::{Plan, PlanMetadata, Task, Week};
use stride_core::slots::{self, Feature};

use crate::enrich::{
    CatalogResourceEnricher, DailyReminderEnricher, ReminderEnricher, ResourceEnricher,
    ScheduleEnricher, SlotScheduleEnricher,
};
use crate::llm::{ChatMessage, CompletionRequest, GenerationError, LlmClient};
use crate::personas;

const WEEKDAYS: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Turns a finalized goal context into a structured plan.
///
/// The pipeline is fixed: validate the context, request synthesis from the
/// planner collaborator, parse the output (degrading to a deterministic
/// fallback plan when it is unusable), run the feature-gated enrichment
/// passes, and stamp the metadata. No branch returns an error to the
/// caller; the worst case is a single-week plan that records what went
/// wrong in its metadata.
pub struct PlanGateway<C, S = SlotScheduleEnricher, R = CatalogResourceEnricher, M = DailyReminderEnricher>
{
    client: C,
    scheduler: S,
    resources: R,
    reminders: M,
    planner: PlannerConfig,
    model_label: String,
}

impl<C> PlanGateway<C>
where
    C: LlmClient,
{
    pub fn new(client: C, config: &AppConfig) -> Self {
        Self::with_enrichers(
            client,
            config,
            SlotScheduleEnricher::new(),
            CatalogResourceEnricher::new(),
            DailyReminderEnricher,
        )
    }

    /// Variant with pinned enrichment RNGs, for reproducible plans.
    pub fn seeded(client: C, config: &AppConfig, seed: u64) -> Self {
        Self::with_enrichers(
            client,
            config,
            SlotScheduleEnricher::seeded(seed),
            CatalogResourceEnricher::seeded(seed),
            DailyReminderEnricher,
        )
    }
}

impl<C, S, R, M> PlanGateway<C, S, R, M>
where
    C: LlmClient,
    S: ScheduleEnricher,
    R: ResourceEnricher,
    M: ReminderEnricher,
{
    pub fn with_enrichers(
        client: C,
        config: &AppConfig,
        scheduler: S,
        resources: R,
        reminders: M,
    ) -> Self {
        Self {
            client,
            scheduler,
            resources,
            reminders,
            planner: config.planner.clone(),
            model_label: config.llm.model.clone(),
        }
    }

    /// Generates a plan for the collected context. Never fails.
    pub async fn generate(&mut self, context: &GoalContext) -> Plan {
        let validated = context.validated();
        let features = slots::extract_features(&context.preferences);

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(personas::planner_system_prompt(&validated)),
                ChatMessage::user(validated.goal.clone()),
            ],
            max_tokens: self.planner.max_tokens,
            temperature: self.planner.temperature,
        };

        let mut plan = match self.client.complete(request).await {
            Ok(raw) => match Plan::from_planner_output(&raw) {
                Ok(plan) => plan,
                Err(parse_error) => {
                    tracing::warn!(
                        event_name = "gateway.planner_output_unusable",
                        goal = %validated.goal,
                        error = %parse_error,
                        "planner output failed to parse; using deterministic fallback plan"
                    );
                    fallback_plan(&validated)
                }
            },
            Err(error) => {
                tracing::error!(
                    event_name = "gateway.planner_unreachable",
                    goal = %validated.goal,
                    error = %error,
                    "plan synthesis failed; returning error plan"
                );
                return self.stamp_metadata(error_plan(&validated, &error), &validated);
            }
        };

        if features.contains(&Feature::Scheduling) {
            plan = self.scheduler.schedule(plan);
        }
        if features.contains(&Feature::Research) {
            plan = self.resources.enrich(plan);
        }
        if features.contains(&Feature::Reminders) {
            plan = self.reminders.add_reminders(plan);
        }

        self.stamp_metadata(plan, &validated)
    }

    /// Fills the identity fields of the plan metadata, leaving whatever the
    /// enrichment passes recorded (reminder settings, error details) alone.
    fn stamp_metadata(&self, mut plan: Plan, validated: &ValidatedGoal) -> Plan {
        plan.metadata.goal = validated.goal.clone();
        plan.metadata.timeline = validated.timeline;
        plan.metadata.seriousness = validated.seriousness;
        plan.metadata.reminders = validated.reminders;
        plan.metadata.created_at = Utc::now();
        plan.metadata.model = self.model_label.clone();
        plan
    }
}

/// Deterministic substitute when planner output is unusable: one generic
/// task per day over the horizon-appropriate number of weeks, bookended by
/// a start task and a review task.
fn fallback_plan(validated: &ValidatedGoal) -> Plan {
    let total_weeks = validated.timeline.horizon().fallback_weeks();

    let weeks = (1..=total_weeks)
        .map(|week_number| {
            let tasks = WEEKDAYS
                .iter()
                .map(|day| {
                    let description = if week_number == 1 && *day == "Monday" {
                        format!("Start working on: {}", validated.goal)
                    } else if week_number == total_weeks && *day == "Sunday" {
                        format!("Review progress and plan next steps for: {}", validated.goal)
                    } else {
                        format!("Continue working on: {}", validated.goal)
                    };
                    Task::new(*day, description)
                })
                .collect();
            Week { week: week_number, tasks }
        })
        .collect();

    Plan { weeks, metadata: PlanMetadata::default() }
}

/// Last-resort plan when the synthesis collaborator itself fails: one week
/// of fixed-wording tasks with the error recorded in metadata.
fn error_plan(validated: &ValidatedGoal, error: &GenerationError) -> Plan {
    let goal = &validated.goal;
    let tasks = vec![
        Task::new("Monday", format!("Start working on: {goal}")),
        Task::new("Tuesday", format!("Continue working on: {goal}")),
        Task::new("Wednesday", format!("Make progress on: {goal}")),
        Task::new("Thursday", format!("Keep working on: {goal}")),
        Task::new("Friday", format!("Review progress on: {goal}")),
    ];

    Plan {
        weeks: vec![Week { week: 1, tasks }],
        metadata: PlanMetadata {
            error: Some(error.to_string()),
            note: Some("This is a simplified plan due to an error during generation.".to_string()),
            ..PlanMetadata::default()
        },
    }
}
