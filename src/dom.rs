//! Markup boundary: html5ever/rcdom plumbing
//!
//! Everything the engine needs from the markup library lives here: parse a
//! rendered fragment into a tree, select heading elements in document
//! order, read a heading's text or inner markup, overwrite it, and
//! serialize the tree back to a string. No indexing logic.
//!
//! Input is treated as body content: the parser wraps it in a full HTML
//! document and serialization returns the body's children only, so a
//! fragment round-trips without gaining wrapper tags.

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::{parse_document, ParseOpts};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::IndexingError;

/// Parse a rendered markup fragment into a DOM tree.
pub fn parse(markup: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(markup)
}

/// The `<body>` element holding the parsed fragment's nodes.
///
/// The HTML tree builder always creates one; a tree without it means the
/// markup boundary misbehaved.
pub fn body(dom: &RcDom) -> Result<Handle, IndexingError> {
    find_element(&dom.document, "body")
        .ok_or_else(|| IndexingError::Markup("parsed tree has no body element".to_string()))
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if &*name.local == tag {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// All heading elements under `root` with their raw depth (1-6), in
/// document order. Heading tags do not nest in parsed HTML, so pre-order
/// traversal is exactly linear source order.
pub fn headings(root: &Handle) -> Vec<(Handle, u32)> {
    let mut found = Vec::new();
    collect_headings(root, &mut found);
    found
}

fn collect_headings(node: &Handle, found: &mut Vec<(Handle, u32)>) {
    if let Some(level) = heading_level(node) {
        found.push((node.clone(), level));
    }
    for child in node.children.borrow().iter() {
        collect_headings(child, found);
    }
}

fn heading_level(node: &Handle) -> Option<u32> {
    match &node.data {
        NodeData::Element { name, .. } => match &*name.local {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        },
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes.
pub fn inner_text(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, text: &mut String) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => text.push_str(&contents.borrow()),
            _ => collect_text(child, text),
        }
    }
}

/// Replace a node's children with a single text node. Existing inner
/// markup is flattened away; serialization escapes the text.
pub fn set_text(node: &Handle, text: &str) {
    *node.children.borrow_mut() = vec![new_text(text)];
}

/// Serialize a node's children to a markup string.
pub fn inner_markup(node: &Handle) -> Result<String, IndexingError> {
    serialize_children(node)
}

/// Replace a node's children with the result of parsing `markup`.
pub fn set_inner_markup(node: &Handle, markup: &str) -> Result<(), IndexingError> {
    let dom = parse(markup);
    let replacement = body(&dom)?.children.borrow().clone();
    *node.children.borrow_mut() = replacement;
    Ok(())
}

/// Serialize a node's children back to a markup string.
pub fn serialize_children(node: &Handle) -> Result<String, IndexingError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| IndexingError::Markup(format!("HTML serialization failed: {}", e)))?;
    String::from_utf8(output)
        .map_err(|e| IndexingError::Markup(format!("UTF-8 conversion failed: {}", e)))
}

fn new_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
