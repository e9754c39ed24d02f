//! A toy document tree built from the token stream of [`list_of_tags`].

use std::fmt;

use super::tags::{closing_tag_of, is_closing_tag, is_html_tag, list_of_tags};

/// One element of a document tree: an opening tag with the elements it
/// encloses, or a text run with no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// The opening tag (`<h1>`) or the raw text of a text run
    pub tag_name: String,
    /// Enclosed elements in document order
    pub content: Vec<Element>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>, content: Vec<Element>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content,
        }
    }

    /// Whether this element is a text run rather than a tag.
    pub fn is_text(&self) -> bool {
        !is_html_tag(&self.tag_name)
    }

    /// Number of elements in this subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.content.iter().map(Element::size).sum::<usize>()
    }

    /// Every element of this subtree, children before their parent.
    pub fn post_order(&self) -> Vec<&Element> {
        let mut out = Vec::with_capacity(self.size());
        collect_post_order(self, &mut out);
        out
    }

    fn closing_tag(&self) -> Option<String> {
        closing_tag_of(&self.tag_name).ok()
    }
}

fn collect_post_order<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in &element.content {
        collect_post_order(child, out);
    }
    out.push(element);
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag_name)?;
        for child in &self.content {
            write!(f, "{child}")?;
        }
        if let Some(closing) = self.closing_tag() {
            f.write_str(&closing)?;
        }
        Ok(())
    }
}

/// Build the top-level elements of `input`.
///
/// Each opening tag encloses every token up to its matching closing tag (or
/// the end of input). Text runs and stray closing tags become leaves.
pub fn build_document_tree(input: &str) -> Vec<Element> {
    let tokens = list_of_tags(input);
    let mut elements = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let tag = &tokens[i];
        i += 1;

        if !is_html_tag(tag) || is_closing_tag(tag) {
            elements.push(Element::new(tag.as_str(), Vec::new()));
            continue;
        }

        let closing = closing_tag_of(tag).ok();
        let start = i;
        while i < tokens.len() && closing.as_deref() != Some(tokens[i].as_str()) {
            i += 1;
        }
        let inner = tokens[start..i].concat();
        elements.push(Element::new(tag.as_str(), build_document_tree(&inner)));

        // Skip the closing tag itself.
        i += 1;
    }

    elements
}

/// Every element of the document, in the order construction finishes them:
/// children before parents, siblings left to right.
pub fn flatten(roots: &[Element]) -> Vec<&Element> {
    roots.iter().flat_map(Element::post_order).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<html><a>hello</a><h1><h4>nestedHello</h4><h3>nestedWorld</h3>\
                          <h6><br>top</br></h6></h1><br>world</br></html>";

    #[test]
    fn test_build_single_root() {
        let roots = build_document_tree(SAMPLE);
        assert_eq!(roots.len(), 1);

        let html = &roots[0];
        assert_eq!(html.tag_name, "<html>");
        let names: Vec<&str> = html.content.iter().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(names, vec!["<a>", "<h1>", "<br>"]);
    }

    #[test]
    fn test_display_round_trips_markup() {
        let roots = build_document_tree(SAMPLE);
        assert_eq!(roots[0].to_string(), SAMPLE);
    }

    #[test]
    fn test_text_is_leaf() {
        let roots = build_document_tree("<a>hi<b>x</b></a>");
        let a = &roots[0];
        assert_eq!(a.content.len(), 2);
        assert!(a.content[0].is_text());
        assert_eq!(a.content[1].tag_name, "<b>");
    }

    #[test]
    fn test_size_counts_every_element() {
        let roots = build_document_tree("<a>hello</a>");
        assert_eq!(roots[0].size(), 2);

        let roots = build_document_tree(SAMPLE);
        assert_eq!(roots[0].size(), 13);
    }

    #[test]
    fn test_post_order() {
        let roots = build_document_tree("<a><b>x</b>y</a>");
        let order: Vec<&str> = roots[0]
            .post_order()
            .into_iter()
            .map(|e| e.tag_name.as_str())
            .collect();
        assert_eq!(order, vec!["x", "<b>", "y", "<a>"]);
    }

    #[test]
    fn test_unclosed_tag_swallows_rest() {
        let roots = build_document_tree("<p>one<i>two");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].size(), 4);
    }

    #[test]
    fn test_flatten_covers_all_roots() {
        let roots = build_document_tree("<a>1</a><b>2</b>");
        assert_eq!(flatten(&roots).len(), 4);
    }
}
