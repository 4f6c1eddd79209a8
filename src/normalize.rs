//! Text normalization for free-text fields.
//!
//! Message bodies and conversation subjects arrive as HTML fragments. Before
//! they are written out, markup tags are stripped, newline runs become a
//! single space and space runs are squeezed to one.
//!
//! # Example
//!
//! ```rust
//! use convoport::normalize::{normalize, normalize_or, NO_SUBJECT};
//!
//! assert_eq!(normalize("<p>Hello</p>\n\n<p>world</p>"), "Hello world");
//! assert_eq!(normalize_or(None, NO_SUBJECT), "no_subject");
//! ```

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Sentinel written when a conversation has no subject.
pub const NO_SUBJECT: &str = "no_subject";

/// Sentinel written when a conversation has no url.
pub const NO_URL: &str = "no_url";

/// Matches one tag. Quoted attribute values are opaque, so a `>` inside
/// `"..."` or `'...'` does not end the tag.
fn tag_re() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| {
        Regex::new(r#"<("[^"]*"|'[^']*'|[^'">])*>"#).expect("valid tag regex")
    })
}

fn newlines_re() -> &'static Regex {
    static NEWLINES_RE: OnceLock<Regex> = OnceLock::new();
    NEWLINES_RE.get_or_init(|| Regex::new(r"\n+").expect("valid newline regex"))
}

fn spaces_re() -> &'static Regex {
    static SPACES_RE: OnceLock<Regex> = OnceLock::new();
    SPACES_RE.get_or_init(|| Regex::new(r" {2,}").expect("valid space regex"))
}

/// Normalizes a free-text value.
///
/// Never fails: unbalanced markup that does not form a complete tag is left
/// in place. The result is a fixed point, so `normalize(&normalize(s)) ==
/// normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let stripped = strip_tags(raw);
    let joined = newlines_re().replace_all(&stripped, " ");
    spaces_re().replace_all(&joined, " ").into_owned()
}

/// Normalizes an optional value, substituting `sentinel` when it is absent.
///
/// An empty string is not absent: `normalize_or(Some(""), NO_URL)` is `""`.
pub fn normalize_or(raw: Option<&str>, sentinel: &str) -> String {
    match raw {
        Some(text) => normalize(text),
        None => sentinel.to_string(),
    }
}

/// Removes tags until none remain.
///
/// A single pass can expose a new tag once an inner one is removed
/// (`<<b>a>`), so stripping repeats to a fixed point.
fn strip_tags(raw: &str) -> Cow<'_, str> {
    let re = tag_re();
    let mut current = Cow::Borrowed(raw);
    loop {
        let next = match re.replace_all(&current, "") {
            Cow::Borrowed(_) => break,
            Cow::Owned(s) => s,
        };
        current = Cow::Owned(next);
    }
    current
}
