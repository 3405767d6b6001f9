use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;

use stride_core::domain::plan::{Plan, Resource};

/// Attaches 1-3 category-matched reference links plus a tip to every task.
/// Purely additive: existing fields are never removed.
pub trait ResourceEnricher {
    fn enrich(&mut self, plan: Plan) -> Plan;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResourceCategory {
    Career,
    Health,
    Learning,
    Financial,
    Relationships,
    Personal,
}

impl ResourceCategory {
    fn infer(task: &str) -> Self {
        let lower = task.to_ascii_lowercase();
        let has = |terms: &[&str]| terms.iter().any(|term| lower.contains(term));

        if has(&["job", "career", "resume", "interview", "internship"]) {
            Self::Career
        } else if has(&["exercise", "workout", "fitness", "health", "diet"]) {
            Self::Health
        } else if has(&["learn", "study", "course", "skill", "programming"]) {
            Self::Learning
        } else if has(&["budget", "money", "invest", "save", "financial"]) {
            Self::Financial
        } else if has(&["relationship", "communication", "friend", "family"]) {
            Self::Relationships
        } else {
            Self::Personal
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Health => "health",
            Self::Learning => "learning",
            Self::Financial => "financial",
            Self::Relationships => "relationships",
            Self::Personal => "personal",
        }
    }

    fn catalog(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Career => &[
                ("LinkedIn Profile Optimization Guide", "https://www.linkedin.com/learning/"),
                ("Resume Writing Best Practices", "https://www.indeed.com/career-advice/resumes-cover-letters"),
                ("Interview Preparation Tips", "https://www.glassdoor.com/blog/interview-questions/"),
                ("Job Search Techniques", "https://www.monster.com/career-advice/"),
            ],
            Self::Health => &[
                ("Fitness Fundamentals", "https://www.acefitness.org/education-and-resources/"),
                ("Nutrition Basics", "https://www.nutrition.gov/"),
                ("Workout Routines", "https://www.bodybuilding.com/workouts/"),
                ("Sleep Optimization", "https://www.sleepfoundation.org/"),
            ],
            Self::Learning => &[
                ("Online Learning Platforms", "https://www.coursera.org/"),
                ("Skill Development Resources", "https://www.skillshare.com/"),
                ("Study Techniques", "https://www.khanacademy.org/"),
                ("Programming Tutorials", "https://www.freecodecamp.org/"),
            ],
            Self::Financial => &[
                ("Budgeting Basics", "https://www.mint.com/"),
                ("Investment Guide", "https://www.investopedia.com/"),
                ("Saving Strategies", "https://www.nerdwallet.com/"),
                ("Debt Management", "https://www.debt.org/"),
            ],
            Self::Relationships => &[
                ("Communication Skills", "https://www.psychologytoday.com/us/topics/communication"),
                ("Conflict Resolution", "https://www.helpguide.org/articles/relationships-communication/"),
                ("Active Listening", "https://www.skillsyouneed.com/ips/active-listening.html"),
            ],
            Self::Personal => &[
                ("Goal Setting Framework", "https://www.mindtools.com/pages/main/newMN_HTE.htm"),
                ("Productivity Hacks", "https://www.lifehack.org/"),
                ("Mindfulness Practices", "https://www.headspace.com/"),
                ("Personal Development Books", "https://www.goodreads.com/shelf/show/personal-development"),
            ],
        }
    }

    fn tip(&self) -> &'static str {
        match self {
            Self::Career => "Tip: network with professionals in your field on LinkedIn",
            Self::Health => "Tip: start with small, sustainable changes for lasting results",
            Self::Learning => "Tip: use the Pomodoro technique for focused study sessions",
            Self::Financial => "Tip: track your expenses to identify spending patterns",
            Self::Relationships => "Tip: practice active listening to improve communication",
            Self::Personal => "Tip: break big goals into smaller, manageable tasks",
        }
    }
}

/// Default resource collaborator: picks reference links from a fixed
/// category catalog.
#[derive(Clone, Debug)]
pub struct CatalogResourceEnricher {
    rng: StdRng,
}

impl CatalogResourceEnricher {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for CatalogResourceEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceEnricher for CatalogResourceEnricher {
    fn enrich(&mut self, mut plan: Plan) -> Plan {
        for week in &mut plan.weeks {
            for task in &mut week.tasks {
                let category = ResourceCategory::infer(&task.task);
                let catalog = category.catalog();
                let count = self.rng.gen_range(1..=3usize.min(catalog.len()));

                task.resources = catalog
                    .choose_multiple(&mut self.rng, count)
                    .map(|(title, url)| Resource {
                        title: (*title).to_string(),
                        url: (*url).to_string(),
                    })
                    .collect();
                task.resource_category = Some(category.as_str().to_string());
                task.helpful_tip = Some(category.tip().to_string());
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogResourceEnricher, ResourceCategory, ResourceEnricher};
    use stride_core::domain::plan::{Plan, PlanMetadata, Task, Week};

    fn single_task_plan(description: &str) -> Plan {
        Plan {
            weeks: vec![Week { week: 1, tasks: vec![Task::new("Tuesday", description)] }],
            metadata: PlanMetadata::default(),
        }
    }

    #[test]
    fn category_inference_reads_task_wording() {
        assert_eq!(ResourceCategory::infer("Update my resume"), ResourceCategory::Career);
        assert_eq!(ResourceCategory::infer("Study Rust traits"), ResourceCategory::Learning);
        assert_eq!(ResourceCategory::infer("Water the plants"), ResourceCategory::Personal);
    }

    #[test]
    fn tasks_receive_one_to_three_matching_resources_and_a_tip() {
        let mut enricher = CatalogResourceEnricher::seeded(5);
        let plan = enricher.enrich(single_task_plan("Study Rust traits"));

        let task = &plan.weeks[0].tasks[0];
        assert!((1..=3).contains(&task.resources.len()));
        assert_eq!(task.resource_category.as_deref(), Some("learning"));
        assert!(task.helpful_tip.as_deref().map(|tip| tip.starts_with("Tip:")).unwrap_or(false));
        for resource in &task.resources {
            assert!(resource.url.starts_with("https://"));
        }
    }

    #[test]
    fn selected_resources_are_distinct() {
        let mut enricher = CatalogResourceEnricher::seeded(9);
        for _ in 0..10 {
            let plan = enricher.enrich(single_task_plan("Plan my weekly budget"));
            let resources = &plan.weeks[0].tasks[0].resources;
            let mut titles: Vec<&str> =
                resources.iter().map(|resource| resource.title.as_str()).collect();
            titles.sort_unstable();
            titles.dedup();
            assert_eq!(titles.len(), resources.len());
        }
    }
}
