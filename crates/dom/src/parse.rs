use crate::error::DomError;
use crate::node::{Element, Node};
use std::path::Path;

/// Parses XML text into a document tree rooted at the document element.
///
/// Element names are taken without namespace, so DocBook 4 and DocBook 5
/// sources produce the same tree. Comments and processing instructions are
/// dropped; text, including whitespace between elements, is kept.
pub fn parse_document(xml: &str) -> Result<Node, DomError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, options)?;
    let root = convert(doc.root_element());
    log::debug!("Parsed document with root <{}>", root.name);
    Ok(Node::Element(root))
}

/// Reads and parses an XML file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Node, DomError> {
    let xml = std::fs::read_to_string(path)?;
    parse_document(&xml)
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        element
            .attributes
            .insert(attr.name().to_string(), attr.value().to_string());
    }
    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert(child)));
        } else if let Some(text) = child.text().filter(|_| child.is_text()) {
            // CDATA sections arrive as separate text nodes.
            match element.children.last_mut() {
                Some(Node::Text(prev)) => prev.push_str(text),
                _ => element.children.push(Node::Text(text.to_string())),
            }
        }
    }
    element
}
