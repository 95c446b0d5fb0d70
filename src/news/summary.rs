use crate::{model::RawEntry, util::html::clean_text};

const MIN_SUMMARY_CHARS: usize = 20;
const MAX_SUMMARY_CHARS: usize = 250;
const ELLIPSIS: char = '…';
const NO_SUMMARY: &str = "Summary not available for this article. Click Full Article to read more.";

type Candidate = fn(&RawEntry) -> Option<&str>;

/// Candidate fields in priority order. The first one that passes the length gate wins.
const CANDIDATES: [Candidate; 4] = [summary, description, first_content, subtitle];

fn summary(entry: &RawEntry) -> Option<&str> {
    entry.summary.as_deref()
}

fn description(entry: &RawEntry) -> Option<&str> {
    entry.description.as_deref()
}

fn first_content(entry: &RawEntry) -> Option<&str> {
    entry.content.first().map(String::as_str)
}

fn subtitle(entry: &RawEntry) -> Option<&str> {
    entry.subtitle.as_deref()
}

pub fn extract_summary(entry: &RawEntry) -> String {
    let accepted = CANDIDATES
        .iter()
        .filter_map(|candidate| candidate(entry))
        .map(clean_text)
        .find(|text| text.chars().count() > MIN_SUMMARY_CHARS);

    if let Some(text) = accepted {
        return truncate_at_word(&text, MAX_SUMMARY_CHARS);
    }

    let title = entry.title.as_deref().map(clean_text).unwrap_or_default();
    if title.is_empty() {
        NO_SUMMARY.to_string()
    } else {
        format!("Read the full story about: {title}")
    }
}

/// Cut `text` to the last word boundary at or before `limit` characters and mark the cut.
/// Input is expected to be whitespace-collapsed already.
fn truncate_at_word(text: &str, limit: usize) -> String {
    let Some((cut, next)) = text.char_indices().nth(limit) else {
        return text.to_string();
    };

    let head = &text[..cut];
    let kept = if next.is_whitespace() {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(idx) => &head[..idx],
            None => head,
        }
    };

    let mut out = kept.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> RawEntry {
        RawEntry::default()
    }

    #[test]
    fn prefers_summary_over_longer_later_fields() {
        let entry = RawEntry {
            summary: Some("<p>The council approved the new budget.</p>".into()),
            description: Some("A much longer description that would otherwise look better.".into()),
            ..entry()
        };
        assert_eq!(extract_summary(&entry), "The council approved the new budget.");
    }

    #[test]
    fn description_is_tried_before_content() {
        let entry = RawEntry {
            description: Some("Flood warnings issued for the coast.".into()),
            content: vec![
                "<div>A far longer content block describing the flood warnings in detail.</div>"
                    .into(),
            ],
            ..entry()
        };
        assert_eq!(extract_summary(&entry), "Flood warnings issued for the coast.");
    }

    #[test]
    fn skips_short_candidates_in_order() {
        let entry = RawEntry {
            summary: Some("Too short".into()),
            description: Some("<b></b>".into()),
            content: vec!["Content block value that is long enough.".into(), "ignored".into()],
            subtitle: Some("Subtitle that is also long enough to pass.".into()),
            ..entry()
        };
        assert_eq!(extract_summary(&entry), "Content block value that is long enough.");
    }

    #[test]
    fn exactly_twenty_chars_is_rejected() {
        let entry = RawEntry {
            title: Some("Bridge reopens".into()),
            subtitle: Some("12345678901234567890".into()),
            ..entry()
        };
        assert_eq!(extract_summary(&entry), "Read the full story about: Bridge reopens");
    }

    #[test]
    fn short_description_falls_back_to_title() {
        let entry = RawEntry {
            title: Some("<em>Markets</em> rally".into()),
            description: Some("Ten chars!".into()),
            ..entry()
        };
        assert_eq!(extract_summary(&entry), "Read the full story about: Markets rally");
    }

    #[test]
    fn no_candidates_and_no_title_uses_literal() {
        assert_eq!(extract_summary(&entry()), NO_SUMMARY);

        let blank_title = RawEntry {
            title: Some("  <br/> ".into()),
            ..entry()
        };
        assert_eq!(extract_summary(&blank_title), NO_SUMMARY);
    }

    #[test]
    fn long_summary_is_cut_at_word_boundary() {
        let words: Vec<String> = (0..60).map(|i| format!("word{i:02}")).collect();
        let text = words.join(" ");
        assert!(text.chars().count() > 300);

        let entry = RawEntry {
            summary: Some(text.clone()),
            ..entry()
        };
        let summary = extract_summary(&entry);

        assert!(summary.chars().count() <= 251);
        assert!(summary.ends_with(ELLIPSIS));
        let body = summary.trim_end_matches(ELLIPSIS);
        assert!(text.starts_with(body));
        for word in body.split(' ') {
            assert!(words.iter().any(|w| w == word), "partial word {word:?}");
        }
    }

    #[test]
    fn boundary_right_after_limit_keeps_full_prefix() {
        let text = format!("{} tail", "a".repeat(250));
        assert_eq!(truncate_at_word(&text, 250), format!("{}…", "a".repeat(250)));
    }

    #[test]
    fn single_long_word_is_hard_cut() {
        let text = "x".repeat(300);
        let cut = truncate_at_word(&text, 250);
        assert_eq!(cut.chars().count(), 251);
    }

    #[test]
    fn text_at_limit_is_untouched() {
        let text = "y".repeat(250);
        assert_eq!(truncate_at_word(&text, 250), text);
    }
}
