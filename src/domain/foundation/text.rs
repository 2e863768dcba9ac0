//! Small text helpers shared across domains.

/// Capitalizes the first letter of every alphabetic run and lowercases
/// the rest, so `"income verification"` becomes `"Income Verification"`
/// and `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// True when the text has cased letters and none of them are lowercase.
pub fn is_all_uppercase(input: &str) -> bool {
    let mut has_cased = false;
    for c in input.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Truncates to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("remote work policy"), "Remote Work Policy");
        assert_eq!(title_case("UTILITY BILL"), "Utility Bill");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn uppercase_detection_needs_letters() {
        assert!(is_all_uppercase("SECTION 2: SCOPE"));
        assert!(!is_all_uppercase("Section 2"));
        assert!(!is_all_uppercase("1234"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
