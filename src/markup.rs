//! Plain-text rendering of the HTML fragments windows carry as content.
//!
//! Only the structure matters on a terminal: tags are dropped, block-level
//! tags become line breaks and the handful of common entities are decoded.

const BREAKING_TAGS: &[&str] = &["p", "br", "div", "li", "h1", "h2", "h3", "tr"];

/// Convert an HTML fragment into display lines. Blank lines are dropped and
/// runs of whitespace inside a line collapse to one space.
pub fn fragment_lines(fragment: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut rest = fragment;

    while let Some(start) = rest.find('<') {
        push_text(&mut current, &rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('>') else {
            // unterminated tag: treat the remainder as text
            push_text(&mut current, &rest[start..]);
            rest = "";
            break;
        };
        if BREAKING_TAGS.contains(&tag_name(&after[..end]).as_str()) {
            flush_line(&mut lines, &mut current);
        }
        rest = &after[end + 1..];
    }
    push_text(&mut current, rest);
    flush_line(&mut lines, &mut current);
    lines
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

fn push_text(current: &mut String, raw: &str) {
    let decoded = decode_entities(raw);
    for ch in decoded.chars() {
        if ch.is_whitespace() {
            if !current.ends_with(' ') && !current.is_empty() {
                current.push(' ');
            }
        } else {
            current.push(ch);
        }
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
