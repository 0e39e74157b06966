//! Letter-level similarity signals between a rendered query and an index key

use ahash::AHashSet;

use crate::config::MatchThresholds;
use crate::error::DegenerateInputError;

/// Latin and Russian Cyrillic letters, either case
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// Drop everything but letters: `"ivanov, i.p."` becomes `"ivanovip"`
pub fn letters_only(name: &str) -> String {
    name.chars().filter(|&c| is_letter(c)).collect()
}

/// Share of the shorter string's characters found, in order, inside the longer
/// one, relative to the longer length
pub fn ordered_cooccurrence(a: &str, b: &str) -> f64 {
    ordered_cooccurrence_chars(&chars(a), &chars(b))
}

/// Shared distinct characters over the larger distinct-character count
pub fn symbol_intersection(a: &str, b: &str) -> f64 {
    symbol_intersection_chars(&chars(a), &chars(b))
}

/// Position-wise mismatches over the shorter length, plus the length difference,
/// divided by the shorter length. Not a Levenshtein distance.
pub fn positional_distance(a: &str, b: &str) -> f64 {
    positional_distance_chars(&chars(a), &chars(b))
}

/// F-score shaped combination of two similarity fractions
pub fn harmonic_mean(x: f64, y: f64) -> f64 {
    if x + y > 0.0 {
        2.0 * (x * y) / (x + y)
    } else {
        0.0
    }
}

/// Longer length over shorter length; infinite if either side is empty
pub fn length_ratio(a: &str, b: &str) -> f64 {
    length_ratio_chars(&chars(a), &chars(b))
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn ordered_cooccurrence_chars(a: &[char], b: &[char]) -> f64 {
    let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
    if long.is_empty() {
        return 0.0;
    }

    let mut cursor = 0;
    for &c in long {
        if cursor == short.len() {
            break;
        }
        if short[cursor] == c {
            cursor += 1;
        }
    }
    cursor as f64 / long.len() as f64
}

fn symbol_intersection_chars(a: &[char], b: &[char]) -> f64 {
    let set_a: AHashSet<char> = a.iter().copied().collect();
    let set_b: AHashSet<char> = b.iter().copied().collect();
    let largest = set_a.len().max(set_b.len());
    if largest == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / largest as f64
}

fn positional_distance_chars(a: &[char], b: &[char]) -> f64 {
    let shortest = a.len().min(b.len());
    if shortest == 0 {
        return 0.0;
    }
    let mismatches = a.iter().zip(b).filter(|(x, y)| x != y).count();
    let tail = a.len().abs_diff(b.len());
    (mismatches + tail) as f64 / shortest as f64
}

fn length_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let shortest = a.len().min(b.len());
    if shortest == 0 {
        return f64::INFINITY;
    }
    a.len().max(b.len()) as f64 / shortest as f64
}

/// Every signal the acceptance rule looks at, for one pair of letter strings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Signals {
    pub distance: f64,
    pub ordered: f64,
    pub intersection: f64,
    pub f1: f64,
    pub length_ratio: f64,
}

impl Signals {
    /// Score two letter-only strings; empty input cannot be scored
    pub fn compute(a: &str, b: &str) -> Result<Self, DegenerateInputError> {
        let a = chars(a);
        let b = chars(b);
        if a.is_empty() || b.is_empty() {
            return Err(DegenerateInputError::EmptyLetters);
        }

        let ordered = ordered_cooccurrence_chars(&a, &b);
        let intersection = symbol_intersection_chars(&a, &b);
        Ok(Self {
            distance: positional_distance_chars(&a, &b),
            ordered,
            intersection,
            f1: harmonic_mean(ordered, intersection),
            length_ratio: length_ratio_chars(&a, &b),
        })
    }

    /// Close enough by distance or by combined similarity, and never too
    /// different in length
    pub fn accepts(&self, thresholds: &MatchThresholds) -> bool {
        (self.distance < thresholds.max_distance || self.f1 >= thresholds.min_f1)
            && self.length_ratio <= thresholds.max_length_ratio
    }
}
