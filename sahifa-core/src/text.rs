//! Text transformations shared by the domain operations.
//!
//! Slugs are trimmed, lowercase identifiers composed of ASCII
//! alphanumerics, Arabic letters, and hyphens. Body text is pre-rendered
//! into minimal paragraph markup before it is stored.

/// Arabic block preserved by [`slugify`].
fn is_arabic(ch: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&ch)
}

/// Derive a URL-safe slug from a title or option label.
///
/// Whitespace and underscores become hyphens, anything outside
/// `[a-z0-9]`, the Arabic block, and `-` is dropped, runs of hyphens
/// collapse, and leading/trailing hyphens are trimmed. May return an
/// empty string (callers supply their own fallback).
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.trim().to_lowercase().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_hyphen = true;
        } else if ch.is_ascii_alphanumeric() || is_arabic(ch) {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        }
        // everything else is dropped without breaking a hyphen run
    }
    out
}

/// Render raw body text as paragraph markup.
///
/// A blank line starts a new `<p>`; a single newline becomes `<br>`;
/// carriage returns are stripped. Blank input yields `<p></p>`.
pub fn normalize_paragraphs(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "<p></p>".to_string();
    }

    let mut out = String::from("<p>");
    let mut newlines = 0usize;
    for ch in trimmed.chars() {
        if ch == '\r' {
            continue;
        }
        if ch == '\n' {
            newlines += 1;
            continue;
        }
        if newlines >= 2 {
            out.push_str("</p><p>");
        } else if newlines == 1 {
            out.push_str("<br>");
        }
        newlines = 0;
        out.push(ch);
    }
    out.push_str("</p>");
    out
}

/// First `max_chars` characters of `body`, with an ellipsis when truncated.
///
/// Counted in characters, not bytes, so Arabic text truncates cleanly.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let mut out: String = body.chars().take(max_chars).collect();
    if body.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

/// Check the `local@domain.tld` shape: one `@`, no whitespace, and a
/// dotted domain with characters on both sides of a dot.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |part: &str| {
        !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@')
    };
    clean(local) && clean(domain) && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
