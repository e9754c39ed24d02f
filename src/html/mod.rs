//! HTML tag balance checks and a toy document tree builder.

mod document;
mod tags;

pub use document::{build_document_tree, flatten, Element};
pub use tags::{
    closing_tag_of, is_closing_tag, is_html_closed, is_html_contained_in_element, is_html_tag,
    list_of_tags,
};
