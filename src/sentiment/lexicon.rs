use std::collections::HashMap;

use super::PolarityScorer;

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

const POSITIVE: &[(&[&str], f32)] = &[
    (
        &[
            "excellent", "wonderful", "amazing", "fantastic", "brilliant", "outstanding",
            "perfect", "exceptional", "superb", "magnificent", "best", "awesome",
            "incredible", "flawless",
        ],
        0.9,
    ),
    (
        &["great", "love", "loved", "loving", "lovely", "delightful", "beautiful"],
        0.7,
    ),
    (
        &[
            "good", "nice", "pleasant", "happy", "glad", "pleased", "satisfied", "exciting",
            "interesting", "impressive", "remarkable", "valuable", "useful", "helpful",
            "enjoy", "enjoyed", "like", "liked", "fast", "smooth", "easy", "friendly",
            "recommend", "better", "thanks", "thank",
        ],
        0.5,
    ),
    (
        &[
            "okay", "ok", "fine", "decent", "adequate", "acceptable", "reasonable",
            "positive", "favorable", "promising", "hopeful",
        ],
        0.3,
    ),
];

const NEGATIVE: &[(&[&str], f32)] = &[
    (
        &[
            "terrible", "awful", "horrible", "dreadful", "atrocious", "abysmal",
            "disastrous", "catastrophic", "devastating", "appalling", "worst", "useless",
            "garbage", "pathetic",
        ],
        0.9,
    ),
    (
        &["hate", "hated", "hates", "disgusting", "furious", "angry", "broken"],
        0.8,
    ),
    (
        &[
            "bad", "poor", "disappointing", "disappointed", "frustrating", "frustrated",
            "annoying", "annoyed", "unpleasant", "difficult", "problematic", "troublesome",
            "worrying", "upsetting", "disturbing", "confusing", "unclear", "worse", "buggy",
            "crash", "crashes", "unhappy", "sad",
        ],
        0.6,
    ),
    (
        &[
            "mediocre", "subpar", "lacking", "insufficient", "underwhelming", "boring",
            "tedious", "dull", "slow", "forgettable", "confused", "expensive",
        ],
        0.3,
    ),
];

/// Modifiers that scale the next sentiment word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("quite", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "none", "nobody", "neither", "nor", "cannot", "without",
];

/// A negated word keeps half its magnitude with the opposite sign.
const NEGATION_FACTOR: f32 = -0.5;

/// How many plain words a pending modifier survives before it lapses.
const MODIFIER_REACH: usize = 2;

// ---------------------------------------------------------------------------
// LexiconScorer
// ---------------------------------------------------------------------------

/// Word-level polarity scorer.
///
/// Tokens are matched case-insensitively. The score of a text is the mean
/// polarity of its sentiment words after applying any pending intensifier or
/// negation, clamped to `[-1, 1]`. Text with no sentiment words scores `0.0`.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f32>,
    intensifiers: HashMap<String, f32>,
}

impl LexiconScorer {
    /// An empty scorer (every text scores zero) with the default modifiers.
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, f)| (w.to_string(), *f))
                .collect(),
        }
    }

    /// Add or overwrite a word. `polarity` is clamped to `[-1, 1]`.
    pub fn insert(&mut self, word: &str, polarity: f32) {
        self.words
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        let mut scorer = Self::new();
        for (words, weight) in POSITIVE {
            for word in *words {
                scorer.insert(word, *weight);
            }
        }
        for (words, weight) in NEGATIVE {
            for word in *words {
                scorer.insert(word, -*weight);
            }
        }
        scorer
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f32 {
        let mut sum = 0.0;
        let mut matched = 0usize;

        let mut intensity = 1.0;
        let mut negated = false;
        let mut since_modifier = 0usize;

        let tokens = text
            .split(|c: char| !(c.is_alphabetic() || c == '\'' || c == '’'))
            .map(|t| t.trim_matches(|c: char| c == '\'' || c == '’').replace('’', "'"))
            .filter(|t| !t.is_empty());

        for token in tokens {
            let lower = token.to_lowercase();

            if is_negator(&lower) {
                negated = true;
                since_modifier = 0;
                continue;
            }
            if let Some(&factor) = self.intensifiers.get(&lower) {
                intensity *= factor;
                since_modifier = 0;
                continue;
            }

            match self.words.get(&lower) {
                Some(&polarity) => {
                    let mut value = polarity * intensity;
                    if negated {
                        value *= NEGATION_FACTOR;
                    }
                    sum += value;
                    matched += 1;
                    intensity = 1.0;
                    negated = false;
                }
                None => {
                    since_modifier += 1;
                    if since_modifier > MODIFIER_REACH {
                        intensity = 1.0;
                        negated = false;
                    }
                }
            }
        }

        if matched == 0 {
            return 0.0;
        }
        (sum / matched as f32).clamp(-1.0, 1.0)
    }
}
