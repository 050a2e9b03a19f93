pub const DEFAULT_MIN_LENGTH: usize = 200;

/// Split a free-text query on whitespace and join the terms into an
/// alternation pattern (`"konst utställning"` -> `"konst|utställning"`).
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    let terms: Vec<&str> = query?.split_whitespace().collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join("|"))
    }
}

/// Cut `text` after its `sentences`-th sentence.
///
/// Texts shorter than `min_length` characters are returned unchanged. A
/// `"? "` terminator wins over `.` when it comes first. Without any
/// terminator the text is cut at `min_length - 1` characters and always gets
/// an ellipsis.
pub fn truncate_paragraph(
    text: &str,
    sentences: usize,
    ellipsis: bool,
    min_length: usize,
) -> String {
    if text.chars().count() < min_length {
        return text.to_string();
    }

    let sentences = sentences.max(1);
    let dot = nth_or_last(text, ".", sentences);
    let question = nth_or_last(text, "? ", sentences);

    let (cut, terminator, ellipsis) = match (dot, question) {
        (Some(dot), Some(question)) if question < dot => (question, "?", ellipsis),
        (Some(dot), _) => (dot, ".", ellipsis),
        (None, Some(question)) => (question, "?", ellipsis),
        (None, None) => (char_offset(text, min_length.saturating_sub(1)), ".", true),
    };

    let suffix = if ellipsis { "..." } else { terminator };
    format!("{}{suffix}", &text[..cut])
}

fn nth_or_last(text: &str, pattern: &str, n: usize) -> Option<usize> {
    text.match_indices(pattern)
        .take(n)
        .last()
        .map(|(index, _)| index)
}

fn char_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text(head: &str) -> String {
        let mut text = head.to_string();
        while text.chars().count() < 300 {
            text.push_str(" Utställningen pågår hela sommaren i konsthallen.");
        }
        text
    }

    #[test]
    fn query_terms_become_alternation() {
        assert_eq!(
            normalize_query(Some("konst  utställning")).as_deref(),
            Some("konst|utställning")
        );
        assert_eq!(normalize_query(Some("konst|måleri")).as_deref(), Some("konst|måleri"));
        assert_eq!(normalize_query(Some("   ")), None);
        assert_eq!(normalize_query(None), None);
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_paragraph("short text", 1, true, 200), "short text");
    }

    #[test]
    fn long_text_is_cut_after_first_sentence() {
        let text = long_text("Konstnären arbetar med skulptur.");
        assert_eq!(
            truncate_paragraph(&text, 1, true, DEFAULT_MIN_LENGTH),
            "Konstnären arbetar med skulptur..."
        );
        assert_eq!(
            truncate_paragraph(&text, 1, false, DEFAULT_MIN_LENGTH),
            "Konstnären arbetar med skulptur."
        );
    }

    #[test]
    fn second_sentence_is_kept_when_asked() {
        let text = long_text("Första meningen. Andra meningen.");
        assert_eq!(
            truncate_paragraph(&text, 2, false, DEFAULT_MIN_LENGTH),
            "Första meningen. Andra meningen."
        );
    }

    #[test]
    fn earlier_question_wins() {
        let text = long_text("Vad är konst? Det är en fråga.");
        assert_eq!(truncate_paragraph(&text, 1, false, DEFAULT_MIN_LENGTH), "Vad är konst?");
        assert_eq!(truncate_paragraph(&text, 1, true, DEFAULT_MIN_LENGTH), "Vad är konst...");
    }

    #[test]
    fn text_without_terminators_is_cut_at_min_length() {
        let text = "ö".repeat(250);
        let truncated = truncate_paragraph(&text, 1, false, DEFAULT_MIN_LENGTH);
        assert_eq!(truncated, format!("{}...", "ö".repeat(199)));
    }
}
