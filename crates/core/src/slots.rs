//! Slot extractors for the goal-collection sequence.
//!
//! Every extractor is total: unrecognized input resolves to a documented
//! default instead of an error, so the flow never stalls on phrasing.

use std::collections::BTreeSet;

use crate::domain::goal::Timeline;
use crate::text::{contains_any, normalize, tokenize};

const FOURTEEN_DAY_TERMS: &[&str] = &["14 day", "2 week", "two week", "fortnight"];
const SIX_MONTH_TERMS: &[&str] = &["6 month", "six month", "half year", "half a year"];
const ONE_MONTH_TERMS: &[&str] = &["1 month", "one month", "a month", "30 day"];
const SEVEN_DAY_TERMS: &[&str] = &["7 day", "1 week", "one week", "a week", "week"];

const AFFIRMATIVE_TOKENS: &[&str] =
    &["yes", "yeah", "yep", "sure", "okay", "ok", "create", "generate", "plan", "ready", "go"];

const STOP_WORDS: &[&str] = &["stop", "wait", "exit", "cancel", "no", "nevermind"];
const REPEAT_TOKENS: &[&str] = &["same", "repeating", "repeat", "again"];

/// Maps free text to a timeline bucket. Specific phrases are checked before
/// bare units so "2 weeks" lands on fourteen days rather than on the "week"
/// shorthand; anything unrecognized defaults to the median bucket.
pub fn extract_timeline(text: &str) -> Timeline {
    let normalized = normalize(text);
    let matches = |terms: &[&str]| terms.iter().any(|term| normalized.contains(term));

    if matches(FOURTEEN_DAY_TERMS) {
        Timeline::FourteenDays
    } else if matches(SIX_MONTH_TERMS) {
        Timeline::SixMonths
    } else if matches(ONE_MONTH_TERMS) {
        Timeline::OneMonth
    } else if matches(SEVEN_DAY_TERMS) {
        Timeline::SevenDays
    } else if normalized.contains("month") {
        Timeline::OneMonth
    } else {
        Timeline::OneMonth
    }
}

/// True when the text reads as an answer about duration at all. Used by the
/// timeline question to spot replies that are really corrections to an
/// earlier answer.
pub fn mentions_timeline(text: &str) -> bool {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);
    tokens.iter().any(|token| token == "7" || token == "14")
        || ["week", "month", "day"].iter().any(|unit| normalized.contains(unit))
}

/// True when the text contains an affirmative token. Anything else means
/// "needs more questions", not an error.
pub fn extract_confirmation(text: &str) -> bool {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);
    AFFIRMATIVE_TOKENS.iter().any(|token| tokens.iter().any(|candidate| candidate == token))
}

/// Plan-enrichment features a user can opt into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Feature {
    Reminders,
    Research,
    Scheduling,
}

impl Feature {
    pub fn all() -> BTreeSet<Self> {
        [Self::Reminders, Self::Research, Self::Scheduling].into_iter().collect()
    }
}

/// Scans preference text for requested enrichment features. "all" or
/// "everything" selects all three; so does an absence of any feature
/// keyword, since no stated preference is read as "give me everything".
pub fn extract_features(text: &str) -> BTreeSet<Feature> {
    let normalized = normalize(text);
    let tokens = tokenize(&normalized);

    if contains_any(&normalized, &tokens, &["all", "everything"]) {
        return Feature::all();
    }

    let mut features = BTreeSet::new();
    if contains_any(&normalized, &tokens, &["remind", "notification", "alert"]) {
        features.insert(Feature::Reminders);
    }
    if contains_any(&normalized, &tokens, &["research", "resource", "link", "article", "material"])
    {
        features.insert(Feature::Research);
    }
    if contains_any(&normalized, &tokens, &["schedule", "time block", "calendar", "slot"]) {
        features.insert(Feature::Scheduling);
    }

    if features.is_empty() {
        Feature::all()
    } else {
        features
    }
}

/// True when the whole message is a stop/cancel keyword that abandons the
/// goal-collection sequence.
pub fn is_stop_word(text: &str) -> bool {
    STOP_WORDS.contains(&normalize(text).as_str())
}

/// True when the whole message asks for the question to be repeated.
pub fn is_repeat_token(text: &str) -> bool {
    REPEAT_TOKENS.contains(&normalize(text).as_str())
}

pub fn is_short(text: &str) -> bool {
    text.trim().chars().count() <= 3
}
