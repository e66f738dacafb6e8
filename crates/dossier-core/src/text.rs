//! Snippet caps shared by the store and its adapters.

/// Hard cap on evidence and ledger snippets, in characters.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Number of raw results summarized on a ledger row.
pub const TOP_RESULTS_MAX: usize = 5;

/// Truncate to at most `max` characters, never splitting a code point.
#[must_use]
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}

/// Truncate to the snippet cap.
#[must_use]
pub fn cap_snippet(value: &str) -> String {
    truncate_chars(value, SNIPPET_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(cap_snippet("hello"), "hello");
    }

    #[test]
    fn long_text_is_capped_at_200_chars() {
        let long = "x".repeat(500);
        assert_eq!(cap_snippet(&long).chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundary() {
        let long = "é".repeat(250);
        let capped = cap_snippet(&long);
        assert_eq!(capped.chars().count(), 200);
        assert_eq!(capped.len(), 400);
    }

    #[test]
    fn exact_length_is_untouched() {
        let exact = "a".repeat(200);
        assert_eq!(cap_snippet(&exact), exact);
    }
}
