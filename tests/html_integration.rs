//! Integration tests for the HTML helpers

use jutils::error::HtmlError;
use jutils::html::{
    build_document_tree, closing_tag_of, flatten, is_html_closed, is_html_contained_in_element,
    list_of_tags, Element,
};

const PAGE: &str = "<html><a>hello</a><h1><h4>nestedHello</h4><h3>nestedWorld</h3>\
                    <h6><br>top</br></h6></h1><br>world</br></html>";

#[test]
fn test_page_is_balanced_and_contained() {
    assert!(is_html_closed(PAGE));
    assert!(is_html_contained_in_element(PAGE));
}

#[test]
fn test_sibling_roots_are_not_contained() {
    let markup = "<div></div><html>Hello!</html>";
    assert!(is_html_closed(markup));
    assert!(!is_html_contained_in_element(markup));
}

#[test]
fn test_flatten_lists_children_before_parents() {
    let roots = build_document_tree(PAGE);
    let order: Vec<String> = flatten(&roots)
        .into_iter()
        .filter(|element| !element.is_text())
        .map(|element| element.tag_name.clone())
        .collect();

    assert_eq!(
        order,
        vec!["<a>", "<h4>", "<h3>", "<br>", "<h6>", "<h1>", "<br>", "<html>"]
    );
}

#[test]
fn test_element_rebuilds_from_its_markup() {
    let roots = build_document_tree(PAGE);
    let rebuilt = build_document_tree(&roots[0].to_string());
    assert_eq!(rebuilt, roots);
}

#[test]
fn test_manual_element_display() {
    let element = Element::new("<p>", vec![Element::new("text", vec![])]);
    assert_eq!(element.to_string(), "<p>text</p>");
    assert_eq!(element.size(), 2);
}

#[test]
fn test_tag_helpers() {
    assert_eq!(list_of_tags("a<b>c"), vec!["a", "<b>", "c"]);
    assert_eq!(closing_tag_of("<span>"), Ok("</span>".to_string()));
    assert!(matches!(
        closing_tag_of("</span>"),
        Err(HtmlError::AlreadyClosed(_))
    ));
}
