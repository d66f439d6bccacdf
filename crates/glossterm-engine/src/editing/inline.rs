use html5ever::local_name;
use markup5ever_rcdom::{Handle, NodeData};

use crate::shortcode::GLOSSARY_TAG;

/// The editable form of a glossary mention:
/// `<span data-shortcode="glossary_term" data-id="1">public cloud</span>`.
///
/// Owns the element and attribute names. The transforms and the picker ask
/// this type for markup and matching instead of spelling them out.
pub struct InlineElement;

impl InlineElement {
    pub const TAG: &'static str = "span";
    pub const SHORTCODE_ATTR: &'static str = "data-shortcode";
    pub const ID_ATTR: &'static str = "data-id";

    /// Markup for one mention. `id` is attribute-escaped, `body` is inserted
    /// as-is since it is already HTML.
    pub fn markup(id: &str, body: &str) -> String {
        format!(
            r#"<{tag} {shortcode}="{GLOSSARY_TAG}" {id_attr}="{id}">{body}</{tag}>"#,
            tag = Self::TAG,
            shortcode = Self::SHORTCODE_ATTR,
            id_attr = Self::ID_ATTR,
            id = html_escape::encode_double_quoted_attribute(id),
        )
    }

    /// True for `span[data-shortcode="glossary_term"]`.
    pub fn matches(node: &Handle) -> bool {
        match &node.data {
            NodeData::Element { name, .. } if name.local == local_name!("span") => {
                attribute(node, Self::SHORTCODE_ATTR).as_deref() == Some(GLOSSARY_TAG)
            }
            _ => false,
        }
    }

    /// The `data-id` of a matching element, decoded. Missing means empty.
    pub fn id(node: &Handle) -> String {
        attribute(node, Self::ID_ATTR).unwrap_or_default()
    }
}

/// Value of attribute `name` on an element node.
pub(crate) fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}
