use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use stride_core::domain::plan::{EnergyLevel, Plan, Priority};

/// Assigns a time block, priority, and energy level to every task. Purely
/// additive: existing fields are never removed.
pub trait ScheduleEnricher {
    fn schedule(&mut self, plan: Plan) -> Plan;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskKind {
    Research,
    Writing,
    Exercise,
    Learning,
    Planning,
    General,
}

impl TaskKind {
    fn infer(description: &str) -> Self {
        let lower = description.to_ascii_lowercase();
        let has = |terms: &[&str]| terms.iter().any(|term| lower.contains(term));

        if has(&["research", "find", "search", "look up"]) {
            Self::Research
        } else if has(&["write", "draft", "prepare"]) {
            Self::Writing
        } else if has(&["exercise", "workout", "run", "gym", "fitness"]) {
            Self::Exercise
        } else if has(&["learn", "study", "read", "watch", "course"]) {
            Self::Learning
        } else if has(&["plan", "organize", "schedule"]) {
            Self::Planning
        } else {
            Self::General
        }
    }

    /// Time slots that suit this kind of work.
    fn slots(&self) -> &'static [&'static str] {
        match self {
            Self::Research => &["09:00-10:00", "10:00-11:00", "14:00-15:00"],
            Self::Writing => &["10:00-11:00", "15:00-16:00", "20:00-21:00"],
            Self::Exercise => &["06:00-07:00", "17:00-18:00", "19:00-20:00"],
            Self::Learning => &["09:00-10:00", "14:00-15:00", "16:00-17:00"],
            Self::Planning => &["08:00-09:00", "13:00-14:00", "18:00-19:00"],
            Self::General => &["10:00-11:00", "14:00-15:00", "16:00-17:00"],
        }
    }
}

/// Default scheduling collaborator: infers a task kind from its wording and
/// draws a slot from the matching pool.
#[derive(Clone, Debug)]
pub struct SlotScheduleEnricher {
    rng: StdRng,
}

impl SlotScheduleEnricher {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for SlotScheduleEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleEnricher for SlotScheduleEnricher {
    fn schedule(&mut self, mut plan: Plan) -> Plan {
        for week in &mut plan.weeks {
            for task in &mut week.tasks {
                let kind = TaskKind::infer(&task.task);
                task.time_block =
                    kind.slots().choose(&mut self.rng).map(|slot| (*slot).to_string());
                task.estimated_duration = Some("1 hour".to_string());
                task.priority = [Priority::High, Priority::Medium, Priority::Low]
                    .choose(&mut self.rng)
                    .copied()
                    .or(Some(Priority::Medium));
                task.energy_level = [EnergyLevel::High, EnergyLevel::Medium, EnergyLevel::Low]
                    .choose(&mut self.rng)
                    .copied()
                    .or(Some(EnergyLevel::Medium));
            }
        }
        plan
    }
}
