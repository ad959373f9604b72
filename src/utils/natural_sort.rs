//! Numeric-aware, case-insensitive string ordering.
//!
//! Channel ids are compared the way a numeric collation would: runs of
//! digits compare by value (`"2"` before `"10"`), everything else compares
//! case-insensitively. Strings that compare equal under those rules are
//! finally ordered by their raw bytes so the result is a total order.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Digits(String),
    Text(String),
}

fn next_segment(chars: &mut Peekable<Chars<'_>>) -> Option<Segment> {
    let first = *chars.peek()?;
    let numeric = first.is_ascii_digit();
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() != numeric {
            break;
        }
        run.push(c);
        chars.next();
    }
    Some(if numeric {
        Segment::Digits(run)
    } else {
        Segment::Text(run.to_lowercase())
    })
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two strings with numeric-aware, case-insensitive ordering
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ordering = match (next_segment(&mut left), next_segment(&mut right)) {
            (None, None) => break,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(Segment::Digits(x)), Some(Segment::Digits(y))) => compare_digit_runs(&x, &y),
            (Some(Segment::Text(x)), Some(Segment::Text(y))) => x.cmp(&y),
            // Digits sort ahead of letters, as in a numeric collation
            (Some(Segment::Digits(_)), Some(Segment::Text(_))) => Ordering::Less,
            (Some(Segment::Text(_)), Some(Segment::Digits(_))) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.cmp(b)
}
