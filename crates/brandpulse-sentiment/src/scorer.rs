//! Lexicon-and-rule polarity scorer.
//!
//! Each sentiment word contributes its valence, adjusted by preceding
//! intensifiers, dampeners and negations, by ALL-CAPS emphasis, and by a
//! contrastive "but". The summed valence is pushed by exclamation marks and
//! normalized into a compound score in `[-1.0, 1.0]`.

use brandpulse_core::Mention;

use crate::lexicon::{is_negator, valence, BOOSTERS, DAMPENERS};

/// Increment applied by an intensifier directly before a sentiment word.
const BOOST_INCREMENT: f64 = 0.293;
/// Extra magnitude for an all-caps sentiment word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier applied to a negated sentiment word.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score.
const NORMALIZATION_ALPHA: f64 = 15.0;
/// How many preceding tokens can modify a sentiment word.
const LOOKBACK: usize = 3;

#[derive(Debug)]
struct Token {
    /// Lowercase, surrounding punctuation and apostrophes removed.
    norm: String,
    is_caps: bool,
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if trimmed.is_empty() {
                return None;
            }
            let has_alpha = trimmed.chars().any(char::is_alphabetic);
            let is_caps = has_alpha
                && trimmed
                    .chars()
                    .filter(|c| c.is_alphabetic())
                    .all(char::is_uppercase);
            let norm = trimmed
                .chars()
                .filter(|&c| c != '\'' && c != '\u{2019}')
                .collect::<String>()
                .to_lowercase();
            Some(Token { norm, is_caps })
        })
        .collect()
}

/// True when some, but not all, alphabetic tokens are written in caps.
fn caps_differential(tokens: &[Token]) -> bool {
    let caps = tokens.iter().filter(|t| t.is_caps).count();
    caps > 0 && caps < tokens.len()
}

/// Signed adjustment a modifier word applies to `valence`.
fn modifier_scalar(modifier: &Token, valence: f64, caps_diff: bool) -> f64 {
    let base = if BOOSTERS.contains(&modifier.norm.as_str()) {
        BOOST_INCREMENT
    } else if DAMPENERS.contains(&modifier.norm.as_str()) {
        -BOOST_INCREMENT
    } else {
        return 0.0;
    };

    let mut scalar = if valence < 0.0 { -base } else { base };
    if caps_diff && modifier.is_caps {
        scalar += CAPS_INCREMENT * valence.signum();
    }
    scalar
}

fn is_modifier(word: &str) -> bool {
    BOOSTERS.contains(&word) || DAMPENERS.contains(&word)
}

fn word_valences(tokens: &[Token]) -> Vec<f64> {
    let caps_diff = caps_differential(tokens);

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if is_modifier(&token.norm) {
                return 0.0;
            }
            let Some(mut v) = valence(&token.norm) else {
                return 0.0;
            };

            if caps_diff && token.is_caps {
                v += CAPS_INCREMENT * v.signum();
            }

            let mut negated = false;
            for distance in 1..=LOOKBACK.min(i) {
                let prev = &tokens[i - distance];
                let decay = match distance {
                    1 => 1.0,
                    2 => 0.95,
                    _ => 0.9,
                };
                v += modifier_scalar(prev, v, caps_diff) * decay;
                negated |= is_negator(&prev.norm);
            }
            if negated {
                v *= NEGATION_SCALAR;
            }
            v
        })
        .collect()
}

/// Weight sentiment before a contrastive "but" down and after it up.
fn apply_but_rule(tokens: &[Token], valences: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.norm == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= 0.5;
        } else if i > pivot {
            *v *= 1.5;
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.chars().filter(|&c| c == '!').count().min(4);
    let questions = text.chars().filter(|&c| c == '?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations as f64 * 0.292 + question_emphasis
}

fn normalize(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

/// Compound polarity of `text` in `[-1.0, 1.0]`, rounded to four decimals.
///
/// Text without any sentiment-bearing word scores exactly `0.0`.
#[must_use]
pub fn polarity(text: &str) -> f64 {
    let tokens = tokenize(text);
    let mut valences = word_valences(&tokens);
    apply_but_rule(&tokens, &mut valences);

    let mut sum: f64 = valences.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }
    sum += punctuation_emphasis(text) * sum.signum();

    (normalize(sum) * 10_000.0).round() / 10_000.0
}

/// Score every mention from its text and set the matching label.
#[must_use]
pub fn score_mentions(mut mentions: Vec<Mention>) -> Vec<Mention> {
    for mention in &mut mentions {
        let score = polarity(&mention.text);
        mention.apply_score(score);
    }
    mentions
}
