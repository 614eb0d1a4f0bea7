//! Location-agnostic approximate substring matching.
//!
//! Patterns are scored in chunks of at most [`MAX_PATTERN_CHARS`]
//! characters. Each chunk runs the bit-parallel edit-distance scan, so a
//! document costs one pass per chunk whatever the chunk length.

use std::collections::HashMap;

/// Longest pattern scored in one pass; longer patterns are chunked.
pub const MAX_PATTERN_CHARS: usize = 32;

/// Fewest single-character edits (insert, delete, substitute) that turn
/// `pattern` into some substring of `text`. Where the substring sits does
/// not matter.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    match pattern.len() {
        0 => 0,
        1..=64 => bit_parallel_distance(pattern, text),
        _ => dp_distance(pattern, text),
    }
}

// Myers' bit-vector scan, search variant: row 0 is free so a match may start
// anywhere. Bit i of the vertical deltas tracks pattern row i + 1.
fn bit_parallel_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut peq: HashMap<char, u64> = HashMap::with_capacity(m);
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_default() |= 1u64 << i;
    }
    let last = 1u64 << (m - 1);
    let mut pv = u64::MAX;
    let mut mv = 0u64;
    let mut score = m;
    let mut best = m;
    for tc in text {
        let eq = peq.get(tc).copied().unwrap_or(0);
        let xv = eq | mv;
        let xh = ((eq & pv).wrapping_add(pv) ^ pv) | eq;
        let ph = mv | !(xh | pv);
        let mh = pv & xh;
        if ph & last != 0 {
            score += 1;
        } else if mh & last != 0 {
            score -= 1;
        }
        let ph = ph << 1;
        let mh = mh << 1;
        pv = mh | !(xv | ph);
        mv = ph & xv;
        best = best.min(score);
        if best == 0 {
            break;
        }
    }
    best
}

fn dp_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    // Column j holds the cost of matching pattern[..i] ending at text[j].
    // Row 0 is always zero: a match may start anywhere.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0usize; m + 1];
    let mut best = m;
    for &tc in text {
        cur[0] = 0;
        for i in 1..=m {
            let subst = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            cur[i] = subst.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Score of `pattern` against `text`: errors per pattern character, so 0.0
/// is an exact occurrence. `None` when the score exceeds `threshold`.
///
/// A pattern longer than [`MAX_PATTERN_CHARS`] is split into chunks. It
/// matches when any chunk does; its score is the mean over chunks, where a
/// chunk that misses counts as 1.0.
pub fn fuzzy_score(pattern: &[char], text: &[char], threshold: f64) -> Option<f64> {
    if pattern.is_empty() {
        return Some(0.0);
    }
    let chunk_score = |chunk: &[char]| {
        let score = substring_distance(chunk, text) as f64 / chunk.len() as f64;
        (score <= threshold).then_some(score)
    };
    if pattern.len() <= MAX_PATTERN_CHARS {
        return chunk_score(pattern);
    }
    let mut matched = false;
    let mut total = 0.0;
    let mut chunks = 0usize;
    for chunk in pattern.chunks(MAX_PATTERN_CHARS) {
        chunks += 1;
        match chunk_score(chunk) {
            Some(score) => {
                matched = true;
                total += score;
            }
            None => total += 1.0,
        }
    }
    matched.then(|| total / chunks as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn exact_occurrence_anywhere_is_free() {
        assert_eq!(substring_distance(&chars("smile"), &chars("(^_^) happy smile")), 0);
        assert_eq!(substring_distance(&chars("hap"), &chars("(^_^) happy smile")), 0);
    }

    #[test]
    fn counts_typos() {
        assert_eq!(substring_distance(&chars("smlie"), &chars("a smile")), 2);
        assert_eq!(substring_distance(&chars("smle"), &chars("a smile")), 1);
        assert_eq!(substring_distance(&chars("smile"), &chars("")), 5);
    }

    #[test]
    fn threshold_bounds_errors() {
        let text = chars("happy smile");
        assert_eq!(fuzzy_score(&chars("smile"), &text, 0.3), Some(0.0));
        assert_eq!(fuzzy_score(&chars("smole"), &text, 0.3), Some(0.2));
        assert_eq!(fuzzy_score(&chars("smole"), &text, 0.0), None);
        assert_eq!(fuzzy_score(&chars("xyzzy"), &text, 0.3), None);
    }

    #[test]
    fn works_on_whole_characters() {
        assert_eq!(substring_distance(&chars("♡"), &chars("love ♡ heart")), 0);
        assert_eq!(substring_distance(&chars("𝓐"), &chars("𝓑")), 1);
    }

    #[test]
    fn bit_parallel_scan_agrees_with_table() {
        let texts = ["(^_^) happy smile happy", "aaaa", "", "𝓐𝓑𝓒 abc", "mississippi"];
        let patterns = ["smile", "smlie", "ssi", "abcd", "𝓑x", "zzzzzzz", "a", "issipi"];
        for t in texts {
            for p in patterns {
                assert_eq!(
                    bit_parallel_distance(&chars(p), &chars(t)),
                    dp_distance(&chars(p), &chars(t)),
                    "pattern {p:?} text {t:?}"
                );
            }
        }
        let long: Vec<char> = "x".repeat(64).chars().collect();
        assert_eq!(bit_parallel_distance(&long, &chars("xx")), 62);
    }

    #[test]
    fn long_patterns_are_scored_in_chunks() {
        let sentence = "the quick brown fox jumps over the lazy dog";
        let text = chars(sentence);
        // One chunk occurs verbatim, the other misses entirely.
        let pattern = chars(&format!("{}qqqqqqqq", &sentence[..32]));
        assert_eq!(pattern.len(), 40);
        assert_eq!(fuzzy_score(&pattern, &text, 0.3), Some(0.5));

        let pasted = chars(&"q".repeat(4096));
        assert_eq!(fuzzy_score(&pasted, &text, 0.3), None);
    }
}
