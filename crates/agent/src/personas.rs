//! System prompts for the generation collaborator.

use stride_core::domain::goal::ValidatedGoal;
use stride_core::flow::states::PersonaTag;

/// Persona instructions for a free-form turn, selected by context tag.
pub fn system_prompt(tag: PersonaTag) -> &'static str {
    match tag {
        PersonaTag::CasualChat => {
            "You are a helpful, friendly productivity assistant. Have natural conversations \
             with users. Be conversational, supportive, and engaging. Help with productivity \
             tips, goal planning, and general questions. Keep responses concise but helpful."
        }
        PersonaTag::ProductivityCoaching => {
            "You are a productivity expert helping users improve their efficiency, focus, and \
             work habits. Provide practical advice and actionable tips."
        }
        PersonaTag::Scheduling => {
            "You are a time management expert helping users organize their schedules and \
             routines. Provide practical scheduling advice."
        }
    }
}

/// Builds the synthesis instruction for a validated goal context: timeframe,
/// commitment level, and reminder cadence are folded into the request, and
/// the output shape is pinned to the plan JSON the gateway parses.
pub fn planner_system_prompt(goal: &ValidatedGoal) -> String {
    let timeframe = goal.timeline.horizon().timeframe();
    let complexity = goal.seriousness.complexity();
    let cadence = goal.reminders.description();

    format!(
        "Create a detailed, personalized plan for this goal: \"{goal_text}\"\n\
         \n\
         Context:\n\
         - Timeline: {timeframe}\n\
         - Commitment level: {level}\n\
         - Reminder preference: {cadence}\n\
         - Plan complexity: {complexity}\n\
         \n\
         The plan must fit the {timeframe} timeline, match the {level} commitment level, and \
         break down into weekly and daily actionable tasks that are realistic for that level \
         of commitment.\n\
         \n\
         Respond with JSON only, in exactly this shape:\n\
         {{\"weeks\": [{{\"week\": 1, \"tasks\": [{{\"day\": \"Monday\", \"task\": \"...\"}}]}}]}}",
        goal_text = goal.goal,
        timeframe = timeframe,
        level = goal.seriousness.label(),
        cadence = cadence,
        complexity = complexity,
    )
}

#[cfg(test)]
mod tests {
    use super::{planner_system_prompt, system_prompt};
    use stride_core::domain::goal::{GoalContext, Timeline};
    use stride_core::flow::states::PersonaTag;

    #[test]
    fn each_persona_has_a_distinct_prompt() {
        let prompts = [
            system_prompt(PersonaTag::CasualChat),
            system_prompt(PersonaTag::ProductivityCoaching),
            system_prompt(PersonaTag::Scheduling),
        ];
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
    }

    #[test]
    fn planner_prompt_carries_goal_and_derived_context() {
        let context = GoalContext {
            goal: "learn Python".to_string(),
            timeline: Some(Timeline::SixMonths),
            confirmed: true,
            ..GoalContext::default()
        };
        let prompt = planner_system_prompt(&context.validated());

        assert!(prompt.contains("learn Python"));
        assert!(prompt.contains("3-6 months"));
        assert!(prompt.contains("High"));
        assert!(prompt.contains("\"weeks\""));
    }
}
