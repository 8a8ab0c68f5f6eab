//! Fuzzy string similarity.
//!
//! No crate in the ecosystem ships a `rapidfuzz`-style partial ratio, so it
//! is built here on top of `strsim`'s normalized Levenshtein similarity:
//! the shorter of the two strings is slid across every same-length window
//! of the longer one, and the best window wins.

/// Lowercase, trim, and strip ASCII punctuation from a name for comparison
/// purposes. The raw name is always preserved elsewhere; this is only used
/// to feed the similarity functions below.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-string similarity in `[0, 100]`, backed by normalized Levenshtein
/// similarity. Used for acronym matching (`fuzz.ratio` in the original).
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Best-substring-alignment similarity in `[0, 100]`.
///
/// Given strings `s` (the shorter one) and `t`, the score is the maximum
/// over every contiguous length-`|s|` substring `u` of `t` of the
/// normalized edit similarity between `s` and `u`.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer): (Vec<char>, Vec<char>) = if a.chars().count() <= b.chars().count() {
        (a.chars().collect(), b.chars().collect())
    } else {
        (b.chars().collect(), a.chars().collect())
    };

    if shorter.len() == longer.len() {
        let s: String = shorter.iter().collect();
        let t: String = longer.iter().collect();
        return ratio(&s, &t);
    }

    let window = shorter.len();
    let s: String = shorter.iter().collect();

    let mut best = 0.0_f64;
    for start in 0..=(longer.len() - window) {
        let candidate: String = longer[start..start + window].iter().collect();
        let score = strsim::normalized_levenshtein(&s, &candidate) * 100.0;
        if score > best {
            best = score;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}
