//! Keyword rules mapping a free-text question to topic keys
//!
//! The table is an explicit ordered slice: candidate topics are produced in
//! table order, so retrieval precedence is reproducible across runs. Every
//! matching rule contributes its topics; a question that matches nothing
//! falls back to `DEFAULT_TOPICS` so the candidate set is never empty.

/// One keyword rule: any keyword matching (case-insensitively, as a
/// substring) maps the question onto the rule's topic keys
#[derive(Debug)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub topics: &'static [&'static str],
}

/// Ordered rule table; earlier rules take retrieval precedence
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &[
            "focus",
            "concentrat",
            "attention",
            "sit still",
            "interrupt",
            "distract",
            "fidget",
        ],
        topics: &["concentration.focus", "concentration.flow", "environment.prepared"],
    },
    KeywordRule {
        keywords: &["tantrum", "meltdown", "crying", "angry", "anger", "frustrat"],
        topics: &["emotions.regulation", "development.planes"],
    },
    KeywordRule {
        keywords: &["hit", "bit", "bite", "push", "aggress", "hurt"],
        topics: &["behavior.aggression", "emotions.regulation", "grace_courtesy.social"],
    },
    KeywordRule {
        keywords: &["share", "sharing", "friend", "social", "play with", "alone"],
        topics: &["grace_courtesy.social", "development.planes"],
    },
    KeywordRule {
        keywords: &["sleep", "nap", "tired", "bedtime"],
        topics: &["rhythms.rest", "home.environment"],
    },
    KeywordRule {
        keywords: &["eat", "food", "meal", "picky", "lunch"],
        topics: &["practical_life.food", "home.environment"],
    },
    KeywordRule {
        keywords: &["toilet", "potty", "accident", "diaper"],
        topics: &["practical_life.toileting", "sensitive_periods.order"],
    },
    KeywordRule {
        keywords: &["read", "letter", "phonic", "language", "vocabulary", "talk", "speech"],
        topics: &["language.acquisition", "sensitive_periods.language"],
    },
    KeywordRule {
        keywords: &["math", "number", "count", "quantity"],
        topics: &["mathematics.foundations", "materials.sequence"],
    },
    KeywordRule {
        keywords: &["write", "writing", "pencil", "grip"],
        topics: &["language.writing", "sensitive_periods.movement"],
    },
    KeywordRule {
        keywords: &["independen", "by himself", "by herself", "on their own", "help me do it"],
        topics: &["independence.self_care", "practical_life.purpose"],
    },
    KeywordRule {
        keywords: &["routine", "transition", "order", "same way", "ritual"],
        topics: &["sensitive_periods.order", "rhythms.daily"],
    },
    KeywordRule {
        keywords: &["move", "climb", "run", "motor", "clumsy", "balance"],
        topics: &["sensitive_periods.movement", "environment.prepared"],
    },
    KeywordRule {
        keywords: &["bored", "motivat", "refus", "won't work", "avoid"],
        topics: &["normalization.deviations", "materials.sequence", "concentration.flow"],
    },
    KeywordRule {
        keywords: &["screen", "tablet", "tv", "television", "phone"],
        topics: &["home.environment", "concentration.focus"],
    },
    KeywordRule {
        keywords: &["discipline", "consequence", "punish", "reward", "obey"],
        topics: &["discipline.inner", "emotions.regulation"],
    },
];

/// Topics substituted when no keyword rule matches
pub const DEFAULT_TOPICS: &[&str] = &["philosophy.whole_child", "development.planes"];

/// Map a question to an ordered, deduplicated candidate topic set
///
/// Order is rule-table definition order; within a rule, topic declaration
/// order. Never returns an empty list.
pub fn identify_topics(question: &str) -> Vec<String> {
    let lowered = question.to_lowercase();
    let mut topics: Vec<String> = Vec::new();

    for rule in KEYWORD_RULES {
        if rule.keywords.iter().any(|kw| lowered.contains(kw)) {
            for topic in rule.topics {
                if !topics.iter().any(|t| t == topic) {
                    topics.push((*topic).to_string());
                }
            }
        }
    }

    if topics.is_empty() {
        topics = DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect();
    }

    topics
}
