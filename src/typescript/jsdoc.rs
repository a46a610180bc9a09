//! `@mock` tag lookup in JSDoc blocks.

/// `@datter` is the older spelling of the same tag.
const TAGS: [&str; 2] = ["@mock", "@datter"];

/// Text of the first `@mock` (or `@datter`) tag in a `/** ... */` block. The tag text runs until
/// the next tag or the end of the block; an empty tag yields `None`.
pub fn hint(comment: &str) -> Option<String> {
    let body = comment.trim().strip_prefix("/**")?;
    let body = body.strip_suffix("*/").unwrap_or(body);

    let mut lines = body.lines().map(|line| {
        let line = line.trim();
        line.strip_prefix('*').unwrap_or(line).trim()
    });

    let mut parts = Vec::new();
    for line in lines.by_ref() {
        let Some(rest) = tag_text(line) else { continue };
        if !rest.is_empty() {
            parts.push(rest);
        }
        break;
    }
    // continuation lines; empty when no tag was found
    for line in lines {
        if line.starts_with('@') {
            break;
        }
        if !line.is_empty() {
            parts.push(line);
        }
    }
    let text = parts.join(" ");
    (!text.is_empty()).then_some(text)
}

/// `Some(rest)` when the line holds a tag itself (not `@mockery`).
fn tag_text(line: &str) -> Option<&str> {
    TAGS.iter().find_map(|tag| {
        let start = line.find(tag)?;
        let rest = &line[start + tag.len()..];
        match rest.chars().next() {
            None => Some(""),
            Some(c) if c.is_whitespace() => Some(rest.trim()),
            Some(_) => None,
        }
    })
}
