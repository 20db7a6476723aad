// 🔍 Fuzzy String Matching - weighted similarity scores on a 0-100 scale
//
// Scores are built from the indel distance (insertions + deletions only):
// - ratio: whole-string similarity
// - partial_ratio: best window of the longer string against the shorter one
// - token_sort / token_set: word-order-insensitive variants
// - weighted_ratio: picks the best of the above with length-dependent weights

use std::collections::BTreeSet;

/// Partial scores count less than whole-string scores
const PARTIAL_SCALE: f64 = 0.90;

/// Token-based scores count less than the base ratio
const UNBASE_SCALE: f64 = 0.95;

// ============================================================================
// PREPROCESSING
// ============================================================================

/// Replace every non-alphanumeric char (except '_') with a space, lowercase, trim
///
/// Example: "Japan-ish typo!" → "japan ish typo"
pub fn full_process(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    replaced.to_lowercase().trim().to_string()
}

/// Scorer preprocessing: drop non-ASCII chars, then full_process
///
/// Example: "Curaçao" → "curaao"
pub fn ascii_process(s: &str) -> String {
    let ascii: String = s.chars().filter(char::is_ascii).collect();
    full_process(&ascii)
}

/// Round half to even, then to an integer score
fn round_score(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 100.0) as u8
}

// ============================================================================
// BASE SCORES
// ============================================================================

/// Length of the longest common subsequence
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                std::cmp::max(prev[j + 1], curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized indel similarity in 0.0..=1.0
///
/// indel distance = len(a) + len(b) - 2·lcs, so similarity = 2·lcs / (len(a) + len(b))
fn similarity(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    (2 * lcs_len(a, b)) as f64 / total as f64
}

/// Whole-string similarity (0-100); 0 when either string is empty
pub fn ratio(s1: &str, s2: &str) -> u8 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    round_score(similarity(&a, &b) * 100.0)
}

/// Best similarity of the shorter string against each same-length window of the longer
pub fn partial_ratio(s1: &str, s2: &str) -> u8 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0.0_f64;
    for window in longer.windows(shorter.len()) {
        let score = similarity(shorter, window);
        if score > 0.995 {
            return 100;
        }
        best = best.max(score);
    }

    round_score(best * 100.0)
}

// ============================================================================
// TOKEN SCORES
// ============================================================================

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Compare after sorting the words of each (already processed) string
pub fn token_sort_ratio(s1: &str, s2: &str, partial: bool) -> u8 {
    let sorted1 = sorted_tokens(s1);
    let sorted2 = sorted_tokens(s2);

    if partial {
        partial_ratio(&sorted1, &sorted2)
    } else {
        ratio(&sorted1, &sorted2)
    }
}

/// Compare the shared words against shared-plus-remainder of each side
pub fn token_set_ratio(s1: &str, s2: &str, partial: bool) -> u8 {
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    let tokens1: BTreeSet<&str> = s1.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = s2.split_whitespace().collect();

    let join = |set: Vec<&str>| set.join(" ");
    let sorted_sect = join(tokens1.intersection(&tokens2).copied().collect());
    let sorted_1to2 = join(tokens1.difference(&tokens2).copied().collect());
    let sorted_2to1 = join(tokens2.difference(&tokens1).copied().collect());

    let combined_1to2 = format!("{} {}", sorted_sect, sorted_1to2).trim().to_string();
    let combined_2to1 = format!("{} {}", sorted_sect, sorted_2to1).trim().to_string();

    let score = |x: &str, y: &str| if partial { partial_ratio(x, y) } else { ratio(x, y) };

    [
        score(&sorted_sect, &combined_1to2),
        score(&sorted_sect, &combined_2to1),
        score(&combined_1to2, &combined_2to1),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

// ============================================================================
// WEIGHTED RATIO
// ============================================================================

/// Best of the base, partial, and token scores, weighted by length ratio
///
/// Both inputs are processed with ascii_process first; an empty result scores 0.
pub fn weighted_ratio(s1: &str, s2: &str) -> u8 {
    let p1 = ascii_process(s1);
    let p2 = ascii_process(s2);
    weighted_ratio_processed(&p1, &p2)
}

/// weighted_ratio for strings already passed through ascii_process
pub fn weighted_ratio_processed(p1: &str, p2: &str) -> u8 {
    let len1 = p1.chars().count();
    let len2 = p2.chars().count();
    if len1 == 0 || len2 == 0 {
        return 0;
    }

    let base = ratio(p1, p2) as f64;
    let len_ratio = len1.max(len2) as f64 / len1.min(len2) as f64;

    if len_ratio < 1.5 {
        let token_sort = token_sort_ratio(p1, p2, false) as f64 * UNBASE_SCALE;
        let token_set = token_set_ratio(p1, p2, false) as f64 * UNBASE_SCALE;
        return round_score(base.max(token_sort).max(token_set));
    }

    let partial_scale = if len_ratio > 8.0 { 0.6 } else { PARTIAL_SCALE };

    let partial = partial_ratio(p1, p2) as f64 * partial_scale;
    let partial_sort = token_sort_ratio(p1, p2, true) as f64 * UNBASE_SCALE * partial_scale;
    let partial_set = token_set_ratio(p1, p2, true) as f64 * UNBASE_SCALE * partial_scale;

    round_score(base.max(partial).max(partial_sort).max(partial_set))
}

/// FuzzyMatch - best choice and its score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub choice: &'a str,
    pub score: u8,
}

/// Best-scoring choice for a query; ties go to the earliest choice
///
/// Returns None only when there are no choices.
pub fn extract_one<'a, I>(query: &str, choices: I) -> Option<FuzzyMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let processed_query = ascii_process(query);
    let mut best: Option<FuzzyMatch<'a>> = None;

    for choice in choices {
        let score = weighted_ratio_processed(&processed_query, &ascii_process(choice));
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(FuzzyMatch { choice, score });
        }
    }

    best
}

// ============================================================================
// TESTS
// ============================================================================
