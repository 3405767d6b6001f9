use stride_core::domain::goal::ReminderCadence;
use stride_core::domain::plan::{Plan, ReminderSettings, Task, TaskReminder};

const DEFAULT_REMINDER_TIME: &str = "09:00";

/// Attaches a reminder block to every task plus plan-level reminder
/// settings. Purely additive: existing fields are never removed.
pub trait ReminderEnricher {
    fn add_reminders(&mut self, plan: Plan) -> Plan;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DailyReminderEnricher;

impl ReminderEnricher for DailyReminderEnricher {
    fn add_reminders(&mut self, mut plan: Plan) -> Plan {
        for week in &mut plan.weeks {
            for task in &mut week.tasks {
                task.reminder = Some(TaskReminder {
                    enabled: true,
                    time: DEFAULT_REMINDER_TIME.to_string(),
                    frequency: ReminderCadence::Daily,
                    message: format!("Time to work on: {}", task.task),
                });
            }
        }

        plan.metadata.reminder_settings = Some(ReminderSettings {
            enabled: true,
            default_time: DEFAULT_REMINDER_TIME.to_string(),
            frequency: ReminderCadence::Daily,
            notification_type: "in_app".to_string(),
        });

        plan
    }
}

/// One-line digest of a day's tasks, used for reminder notifications.
pub fn today_summary(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks for today! Take a break or plan something for tomorrow.".to_string();
    }
    let task_list =
        tasks.iter().map(|task| task.task.as_str()).collect::<Vec<_>>().join(", ");
    format!("Today's plan: {task_list}. You've got this!")
}

#[cfg(test)]
mod tests {
    use super::{today_summary, DailyReminderEnricher, ReminderEnricher};
    use stride_core::domain::goal::ReminderCadence;
    use stride_core::domain::plan::{Plan, PlanMetadata, Task, Week};

    #[test]
    fn every_task_gets_a_reminder_and_the_plan_gets_settings() {
        let plan = Plan {
            weeks: vec![Week {
                week: 1,
                tasks: vec![Task::new("Monday", "Stretch"), Task::new("Tuesday", "Jog")],
            }],
            metadata: PlanMetadata::default(),
        };

        let mut enricher = DailyReminderEnricher;
        let plan = enricher.add_reminders(plan);

        for task in &plan.weeks[0].tasks {
            let reminder = task.reminder.as_ref().expect("reminder attached");
            assert!(reminder.enabled);
            assert_eq!(reminder.frequency, ReminderCadence::Daily);
            assert!(reminder.message.contains(&task.task));
        }

        let settings = plan.metadata.reminder_settings.expect("plan-level settings");
        assert_eq!(settings.default_time, "09:00");
        assert_eq!(settings.notification_type, "in_app");
    }

    #[test]
    fn today_summary_lists_tasks_or_offers_a_break() {
        let tasks = vec![Task::new("Monday", "Stretch"), Task::new("Monday", "Jog")];
        let summary = today_summary(&tasks);
        assert!(summary.contains("Stretch, Jog"));

        assert!(today_summary(&[]).contains("No tasks for today"));
    }
}
