//! Word valences and modifier lists used by the scorer.
//!
//! Valences sit on a `[-4.0, 4.0]` scale. Entries are lowercase.

pub(crate) const VALENCES: &[(&str, f64)] = &[
    // Positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("blazing", 1.2),
    ("brilliant", 2.8),
    ("cheap", 0.6),
    ("clean", 1.7),
    ("cool", 1.3),
    ("decent", 1.0),
    ("delighted", 2.9),
    ("dope", 1.6),
    ("easy", 1.9),
    ("efficient", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 2.2),
    ("exciting", 2.2),
    ("fantastic", 2.6),
    ("fast", 1.2),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fixed", 1.1),
    ("flawless", 2.8),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("improved", 1.9),
    ("improvement", 2.0),
    ("incredible", 2.4),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("perfectly", 2.7),
    ("pleased", 1.9),
    ("powerful", 1.8),
    ("quiet", 0.9),
    ("recommend", 1.5),
    ("recommended", 1.8),
    ("reliable", 1.9),
    ("satisfied", 1.8),
    ("smooth", 1.6),
    ("solid", 1.4),
    ("stable", 1.2),
    ("superb", 3.1),
    ("thanks", 1.9),
    ("upgrade", 1.0),
    ("value", 1.1),
    ("win", 2.8),
    ("winner", 2.8),
    ("wins", 2.7),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("wow", 2.8),
    // Negative
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("artifacts", -0.8),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bottleneck", -1.0),
    ("broke", -1.8),
    ("broken", -2.1),
    ("bug", -1.4),
    ("buggy", -1.8),
    ("bugs", -1.4),
    ("crash", -1.9),
    ("crashed", -1.9),
    ("crashes", -1.9),
    ("crashing", -1.9),
    ("dead", -3.3),
    ("defective", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("error", -1.7),
    ("errors", -1.4),
    ("expensive", -0.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.3),
    ("failure", -2.3),
    ("fault", -1.7),
    ("faulty", -1.8),
    ("garbage", -2.0),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("hot", -0.3),
    ("issue", -0.6),
    ("issues", -0.8),
    ("lag", -1.0),
    ("laggy", -1.3),
    ("loud", -0.6),
    ("meh", -0.3),
    ("mess", -1.5),
    ("nightmare", -2.7),
    ("overheating", -1.6),
    ("overpriced", -1.9),
    ("pain", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("regret", -1.9),
    ("ripoff", -2.3),
    ("sad", -2.1),
    ("scam", -2.6),
    ("slow", -1.2),
    ("stuck", -1.0),
    ("stutter", -1.2),
    ("stuttering", -1.3),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("trash", -2.1),
    ("ugly", -2.3),
    ("unstable", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Words that flip the polarity of a following sentiment word.
pub(crate) const NEGATORS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt",
];

/// Intensifiers that push a following sentiment word further from zero.
pub(crate) const BOOSTERS: &[&str] = &[
    "absolutely",
    "completely",
    "considerably",
    "deeply",
    "especially",
    "exceptionally",
    "extremely",
    "fully",
    "greatly",
    "highly",
    "hugely",
    "incredibly",
    "insanely",
    "massively",
    "most",
    "particularly",
    "really",
    "remarkably",
    "so",
    "super",
    "totally",
    "tremendously",
    "truly",
    "very",
];

/// Softeners that pull a following sentiment word toward zero.
pub(crate) const DAMPENERS: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "kinda",
    "less",
    "marginally",
    "occasionally",
    "partly",
    "scarcely",
    "slightly",
    "somewhat",
];

pub(crate) fn valence(word: &str) -> Option<f64> {
    VALENCES
        .iter()
        .find(|&&(w, _)| w == word)
        .map(|&(_, v)| v)
}

/// Negation check on a normalized (apostrophe-free, lowercase) token.
pub(crate) fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word)
}
