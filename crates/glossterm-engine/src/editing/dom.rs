//! Thin layer over `html5ever` for the save transform: parse editable HTML
//! the way a browser's `DOMParser` would, and serialize it back out with
//! selected elements swapped for raw text.

use std::io::{self, Write};

use html5ever::{
    ParseOpts, local_name, parse_document,
    serialize::{HtmlSerializer, Serialize, SerializeOpts, Serializer, TraversalScope},
    tendril::TendrilSink,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Parses `html` as a full document. Fragments land inside `<body>`.
pub fn parse(html: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(html)
}

/// The `<body>` element of a parsed document.
pub fn body(dom: &RcDom) -> Option<Handle> {
    find_element(&dom.document, "body")
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data
            && &*name.local == tag
        {
            return Some(child.clone());
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Serializes the children of `parent`, letting `render` replace any node
/// that `select` picks.
///
/// `render` returns raw text to write in place of the node, or `None` to keep
/// the node as it is. Ancestors of selected nodes are written tag by tag;
/// every other subtree goes straight through the html5ever serializer.
pub fn serialize_children_with<S, R>(parent: &Handle, select: S, mut render: R) -> io::Result<String>
where
    S: Fn(&Handle) -> bool,
    R: FnMut(&Handle) -> io::Result<Option<String>>,
{
    let mut serializer = HtmlSerializer::new(Vec::new(), SerializeOpts::default());
    for child in parent.children.borrow().iter() {
        write_node(&mut serializer, child, &select, &mut render)?;
    }
    into_string(serializer.writer)
}

fn write_node<W, S, R>(
    serializer: &mut HtmlSerializer<W>,
    node: &Handle,
    select: &S,
    render: &mut R,
) -> io::Result<()>
where
    W: Write,
    S: Fn(&Handle) -> bool,
    R: FnMut(&Handle) -> io::Result<Option<String>>,
{
    if select(node)
        && let Some(text) = render(node)?
    {
        return serializer.writer.write_all(text.as_bytes());
    }

    match &node.data {
        NodeData::Element { name, attrs, .. }
            if name.local != local_name!("template") && has_selected_descendant(node, select) =>
        {
            {
                let attrs = attrs.borrow();
                serializer.start_elem(
                    name.clone(),
                    attrs.iter().map(|attr| (&attr.name, &*attr.value)),
                )?;
            }
            for child in node.children.borrow().iter() {
                write_node(serializer, child, select, render)?;
            }
            serializer.end_elem(name.clone())
        }
        _ => SerializableHandle::from(node.clone()).serialize(serializer, TraversalScope::IncludeNode),
    }
}

fn has_selected_descendant<S>(node: &Handle, select: &S) -> bool
where
    S: Fn(&Handle) -> bool,
{
    node.children
        .borrow()
        .iter()
        .any(|child| select(child) || has_selected_descendant(child, select))
}

fn into_string(bytes: Vec<u8>) -> io::Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
