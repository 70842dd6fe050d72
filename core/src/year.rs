//! Permissive year parsing.
//!
//! Years come from free text ("1969", "44 BC", "c. 1200", "2000s"). Anything
//! that doesn't start with a number is not a year and never passes a year test.

/// Parses the leading integer of `raw`, ignoring trailing text.
///
/// A trailing `BC`/`BCE` marker turns the value negative, so such events fall
/// below every AD floor.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i32 = rest[..digits_end].parse().ok()?;
    let suffix = rest[digits_end..].trim_start().to_ascii_uppercase();
    let bc = suffix.starts_with("BC");

    Some(if negative ^ bc { -value } else { value })
}

/// True when `raw` parses to a year of at least `min_year`.
pub fn year_at_least(raw: &str, min_year: i32) -> bool {
    parse_year(raw).is_some_and(|y| y >= min_year)
}
