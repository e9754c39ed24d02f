//! Tag scanning and balance checks over raw markup.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::HtmlError;

static TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"^<[^<>]+>$"));
static CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"^</[^<>]+>$"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid built-in pattern {pattern}: {err}"),
    }
}

/// Split markup into tag tokens and text tokens.
///
/// A tag token runs from `<` up to and including the next `>` (or to the end
/// of input). A text token runs up to, but not including, the next `<`.
pub fn list_of_tags(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let end = if rest.starts_with('<') {
            rest.find('>').map_or(rest.len(), |i| i + 1)
        } else {
            rest.find('<').unwrap_or(rest.len())
        };
        let (token, tail) = rest.split_at(end);
        tokens.push(token.to_string());
        rest = tail;
    }

    tracing::trace!(count = tokens.len(), "Scanned markup");
    tokens
}

/// Whether the whole string is a single `<...>` tag.
pub fn is_html_tag(s: &str) -> bool {
    TAG.is_match(s)
}

/// Whether the whole string is a single `</...>` tag.
pub fn is_closing_tag(s: &str) -> bool {
    CLOSING_TAG.is_match(s)
}

/// The closing counterpart of an opening tag: `<b>` becomes `</b>`.
pub fn closing_tag_of(tag: &str) -> Result<String, HtmlError> {
    if is_closing_tag(tag) {
        return Err(HtmlError::AlreadyClosed(tag.to_string()));
    }
    if !is_html_tag(tag) {
        return Err(HtmlError::NotATag(tag.to_string()));
    }
    let name: String = tag.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    Ok(format!("</{name}>"))
}

/// Whether `tag` closes the element opened by `open`.
///
/// An unmatched closing tag left on the stack never matches anything.
fn closes(tag: &str, open: &str) -> bool {
    closing_tag_of(open).is_ok_and(|closing| closing == tag)
}

/// Push `tag` onto the open-element stack, or pop it if it closes the top.
fn apply(stack: &mut Vec<String>, tag: &str) {
    match stack.last() {
        Some(top) if closes(tag, top) => {
            stack.pop();
        }
        _ => stack.push(tag.to_string()),
    }
}

/// Are all the tags that were opened also closed?
pub fn is_html_closed(input: &str) -> bool {
    let mut stack = Vec::new();
    for tag in list_of_tags(input).iter().filter(|t| is_html_tag(t)) {
        apply(&mut stack, tag);
    }

    tracing::debug!(unclosed = ?stack, "Checked tag balance");
    stack.is_empty()
}

/// Is all of the markup wrapped in the element opened by its first token?
///
/// The first token must be a tag, and the open-element stack may only empty
/// out at the final token.
pub fn is_html_contained_in_element(input: &str) -> bool {
    let tags = list_of_tags(input);
    let Some((first, rest)) = tags.split_first() else {
        return false;
    };
    if !is_html_tag(first) {
        return false;
    }

    let mut stack = vec![first.clone()];
    let last = rest.len();
    for (i, tag) in rest.iter().enumerate() {
        if is_html_tag(tag) {
            apply(&mut stack, tag);
        }
        if stack.is_empty() && i + 1 != last {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_of_tags_splits_tags_and_text() {
        assert_eq!(
            list_of_tags("<a>hello</a><br>"),
            vec!["<a>", "hello", "</a>", "<br>"]
        );
    }

    #[test]
    fn test_list_of_tags_unterminated_tag_runs_to_end() {
        assert_eq!(list_of_tags("text<a<b"), vec!["text", "<a<b"]);
        assert!(list_of_tags("").is_empty());
    }

    #[test]
    fn test_is_html_tag() {
        assert!(is_html_tag("<html>"));
        assert!(is_html_tag("</html>"));
        assert!(is_html_tag("<a href=\"x\">"));
        assert!(!is_html_tag("<>"));
        assert!(!is_html_tag("html"));
        assert!(!is_html_tag("<a><b>"));
    }

    #[test]
    fn test_closing_tag_of() {
        assert_eq!(closing_tag_of("<div>").unwrap(), "</div>");
        assert_eq!(
            closing_tag_of("</div>"),
            Err(HtmlError::AlreadyClosed("</div>".into()))
        );
        assert_eq!(
            closing_tag_of("div"),
            Err(HtmlError::NotATag("div".into()))
        );
    }

    #[test]
    fn test_is_html_closed() {
        assert!(is_html_closed("<html><a>hello</a></html>"));
        assert!(is_html_closed("plain text"));
        assert!(!is_html_closed("<html><a>hello</html>"));
        assert!(!is_html_closed("</a><a>"));
    }

    #[test]
    fn test_is_html_contained_in_element() {
        assert!(is_html_contained_in_element(
            "<html>Hello!<script>console.log('Hello World!');</script></html>"
        ));
        assert!(!is_html_contained_in_element(
            "<div></div><html>Hello!<script>console.log('Hello World!');</script></html>"
        ));
        assert!(!is_html_contained_in_element("text<a></a>"));
        assert!(!is_html_contained_in_element(""));
    }
}
