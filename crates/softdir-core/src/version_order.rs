//! Numeric-aware ordering for version directory labels.
//!
//! Version folders are plain directory names (`9.0`, `10.0`, `v2.3.1-beta`),
//! not semver. Runs of ASCII digits are compared by numeric value and
//! everything else character by character, case-insensitively, so `10.0`
//! sorts above `9.0` where a lexical sort would put it below.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two labels in ascending natural order.
///
/// Labels that compare equal under the natural rules (`1.01` vs `1.1`,
/// `Beta` vs `beta`) are tie-broken by plain string order so the result is a
/// total order.
///
/// ```rust
/// use softdir_core::version_order::compare_labels;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_labels("10.0", "9.0"), Ordering::Greater);
/// assert_eq!(compare_labels("1.2.3", "1.10"), Ordering::Less);
/// ```
#[must_use]
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ordering = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                compare_digit_runs(&take_digits(&mut left), &take_digits(&mut right))
            },
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                fold_case(l).cmp(&fold_case(r))
            },
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.cmp(b)
}

/// Sort labels newest first.
pub fn sort_descending<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by(|a, b| compare_labels(b.as_ref(), a.as_ref()));
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(compare_labels("10.0", "9.0"), Ordering::Greater);
        assert_eq!(compare_labels("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_labels("v2", "v10"), Ordering::Less);
        assert_eq!(compare_labels("2024.12", "2025.1"), Ordering::Less);
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        assert_eq!(compare_labels("Alpha", "beta"), Ordering::Less);
        assert_eq!(compare_labels("1.0-RC", "1.0-beta"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_labels("2.0", "2.0-beta"), Ordering::Less);
        assert_eq!(compare_labels("", "1"), Ordering::Less);
    }

    #[test]
    fn test_ties_are_broken_deterministically() {
        assert_ne!(compare_labels("1.01", "1.1"), Ordering::Equal);
        assert_ne!(compare_labels("Beta", "beta"), Ordering::Equal);
        assert_eq!(compare_labels("1.0", "1.0"), Ordering::Equal);
    }

    #[test]
    fn test_sort_descending() {
        let mut labels = vec!["9.0", "10.0", "1.2", "10.2", "latest"];
        sort_descending(&mut labels);
        assert_eq!(labels, vec!["latest", "10.2", "10.0", "9.0", "1.2"]);
    }

    #[test]
    fn test_long_digit_runs_do_not_overflow() {
        assert_eq!(
            compare_labels("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
    }

    proptest! {
        #[test]
        fn prop_numeric_order_wins_over_lexical(a in 0u32..100_000, b in 0u32..100_000) {
            let left = format!("{a}.0");
            let right = format!("{b}.5");
            let expected = a.cmp(&b).then(Ordering::Less);
            prop_assert_eq!(compare_labels(&left, &right), expected);
        }

        #[test]
        fn prop_ordering_is_antisymmetric(a in "[0-9a-zA-Z.\\-]{0,12}", b in "[0-9a-zA-Z.\\-]{0,12}") {
            prop_assert_eq!(compare_labels(&a, &b), compare_labels(&b, &a).reverse());
        }
    }
}
