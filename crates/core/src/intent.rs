use crate::text::{contains_any, normalize, tokenize};

/// Coarse category of what the user wants from the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    GoalPlanning,
    Scheduling,
    ProductivityCoaching,
    CasualChat,
    Greeting,
    Unknown,
}

const GREETING_TERMS: &[&str] =
    &["hi", "hello", "hey", "good morning", "good afternoon", "good evening"];

const PRODUCTIVITY_TERMS: &[&str] = &[
    "productive",
    "efficient",
    "focus",
    "motivation",
    "habit",
    "work better",
    "productivity tips",
    "study habits",
    "work habits",
];

const GOAL_CREATION_PHRASES: &[&str] = &[
    "create a goal",
    "make a goal",
    "set a goal",
    "create goal",
    "make goal",
    "set goal",
    "goal for me",
    "create for me",
];

const GOAL_TERMS: &[&str] = &[
    "goal",
    "achieve",
    "plan",
    "create",
    "work on",
    "learn",
    "improve",
    "get better",
    "start",
    "master",
    "study",
    "develop",
    "build",
    "lose weight",
    "gain muscle",
    "want to",
    "need to",
];

const SCHEDULING_TERMS: &[&str] =
    &["schedule", "organize", "plan my day", "routine", "calendar", "time"];

const CASUAL_TERMS: &[&str] = &[
    "chat",
    "talk",
    "just",
    "how are you",
    "what's up",
    "tell me about",
    "what are",
    "how do i",
    "can you help",
    "help me",
    "assist",
];

/// Inputs too ambiguous for keyword matching regardless of overlap.
const FILLER_TOKENS: &[&str] = &["wtf", "what", "h", "l", "o", "wait", "stop", "no", "yes"];

/// Threshold above which unmatched prose is treated as an implicit goal
/// statement rather than small talk.
const PROSE_THRESHOLD: usize = 5;

/// Keyword-table intent classifier. Stateless and deterministic; ambiguity
/// is resolved by a fixed priority order, never reported as a failure.
#[derive(Clone, Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies one user turn. Evaluation order is fixed: greeting,
    /// coaching, explicit goal creation, goal keywords, scheduling, casual
    /// chat; first match wins. Short or filler inputs are forced to casual
    /// chat, and long prose with no match at all falls back to goal
    /// planning, since users often state goals without trigger words.
    pub fn classify(&self, text: &str) -> Intent {
        if is_ambiguous_input(text) {
            return Intent::CasualChat;
        }

        let normalized = normalize(text);
        let tokens = tokenize(&normalized);

        if contains_any(&normalized, &tokens, GREETING_TERMS) {
            Intent::Greeting
        } else if contains_any(&normalized, &tokens, PRODUCTIVITY_TERMS) {
            Intent::ProductivityCoaching
        } else if contains_any(&normalized, &tokens, GOAL_CREATION_PHRASES)
            || contains_any(&normalized, &tokens, GOAL_TERMS)
        {
            Intent::GoalPlanning
        } else if contains_any(&normalized, &tokens, SCHEDULING_TERMS) {
            Intent::Scheduling
        } else if contains_any(&normalized, &tokens, CASUAL_TERMS) {
            Intent::CasualChat
        } else if text.trim().chars().count() > PROSE_THRESHOLD {
            Intent::GoalPlanning
        } else {
            Intent::Unknown
        }
    }
}

/// True for explicit "create/set/make a goal" requests. The flow treats
/// these specially (canned goal pre-fill, importance question skipped).
pub fn matches_goal_creation(text: &str) -> bool {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);
    contains_any(&normalized, &tokens, GOAL_CREATION_PHRASES)
}

/// True when the text carries an actual goal keyword, as opposed to being
/// classified as goal planning only through the long-prose fallback.
pub fn has_goal_keyword(text: &str) -> bool {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);
    contains_any(&normalized, &tokens, GOAL_TERMS)
}

/// Short or filler inputs carry too little signal for keyword matching.
pub fn is_ambiguous_input(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() <= 3 || FILLER_TOKENS.contains(&normalize(trimmed).as_str())
}

#[cfg(test)]
mod tests {
    use super::{
        has_goal_keyword, is_ambiguous_input, matches_goal_creation, Intent, IntentClassifier,
    };

    #[test]
    fn short_and_filler_inputs_are_casual_chat() {
        let classifier = IntentClassifier::new();
        for input in ["ok", "h", "", "what", "stop", "yes", "WAIT"] {
            assert_eq!(classifier.classify(input), Intent::CasualChat, "input: {input:?}");
        }
    }

    #[test]
    fn greeting_wins_over_everything_else() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("hello, I want to learn guitar"), Intent::Greeting);
        assert_eq!(classifier.classify("good morning"), Intent::Greeting);
    }

    #[test]
    fn greeting_words_do_not_fire_inside_other_words() {
        let classifier = IntentClassifier::new();
        // "this" contains "hi" as a substring; token matching must not bite.
        assert_eq!(
            classifier.classify("Can you help me get organized this week?"),
            Intent::Scheduling
        );
    }

    #[test]
    fn scheduling_beats_casual_chat_in_priority_order() {
        let classifier = IntentClassifier::new();
        // Carries both a casual phrase ("can you help") and a scheduling
        // keyword ("organized"); the fixed order resolves to scheduling.
        assert_eq!(
            classifier.classify("Can you help me get organized this week?"),
            Intent::Scheduling
        );
    }

    #[test]
    fn coaching_beats_goal_keywords() {
        let classifier = IntentClassifier::new();
        assert_eq!(
            classifier.classify("I want to improve my focus"),
            Intent::ProductivityCoaching
        );
    }

    #[test]
    fn goal_statements_classify_as_goal_planning() {
        let classifier = IntentClassifier::new();
        assert_eq!(classifier.classify("I want to learn Python"), Intent::GoalPlanning);
        assert_eq!(classifier.classify("set a goal for me"), Intent::GoalPlanning);
    }

    #[test]
    fn unmatched_prose_falls_back_to_goal_planning() {
        let classifier = IntentClassifier::new();
        assert_eq!(
            classifier.classify("run a marathon before my fortieth birthday"),
            Intent::GoalPlanning
        );
    }

    #[test]
    fn goal_creation_phrases_are_detected() {
        assert!(matches_goal_creation("please set a goal for me"));
        assert!(matches_goal_creation("create a goal around dsa"));
        assert!(!matches_goal_creation("I want to learn Python"));
    }

    #[test]
    fn goal_keyword_predicate_distinguishes_fallback_matches() {
        assert!(has_goal_keyword("I want to learn Python"));
        assert!(!has_goal_keyword("run a marathon before my fortieth birthday"));
    }

    #[test]
    fn ambiguity_predicate_covers_length_and_fillers() {
        assert!(is_ambiguous_input("no"));
        assert!(is_ambiguous_input("what"));
        assert!(!is_ambiguous_input("nope"));
    }
}
