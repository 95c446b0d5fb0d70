use scraper::{Html, Node};

/// Characters that break out of a quoted string when text is embedded in inline script.
const EMBED_UNSAFE: [char; 6] = ['\'', '"', '`', '\n', '\r', '\\'];

/// Turn raw feed text into display text.
/// - Parses the input as an HTML fragment, so entities are decoded and malformed markup
///   degrades to whatever text the parser recovers
/// - Drops the bodies of <script> and <style> elements
/// - Collapses whitespace runs (newlines included) to single spaces and trims ends
pub fn clean_text(input: &str) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(input);
    let mut out = String::with_capacity(input.len());
    for node in fragment.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| matches!(el.name(), "script" | "style"))
                .unwrap_or(false)
        });
        if !hidden {
            out.push_str(text);
        }
    }

    collapse_whitespace(&out)
}

/// Strip characters that are unsafe inside script string literals, replacing each with a space.
pub fn sanitize_for_embedding(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    input
        .chars()
        .map(|ch| if EMBED_UNSAFE.contains(&ch) { ' ' } else { ch })
        .collect::<String>()
        .trim()
        .to_string()
}

fn collapse_whitespace(input: &str) -> String {
    let mut collapsed = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                collapsed.push(' ');
                last_space = true;
            }
        } else {
            collapsed.push(ch);
            last_space = false;
        }
    }

    collapsed.trim().to_string()
}
