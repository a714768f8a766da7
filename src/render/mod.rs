//! Renderers turn typed page content into [`Patch`]es addressed to template
//! anchors. They never touch the document themselves; the bootstrapper applies
//! the patches once every pipeline has finished.

pub mod about;
pub mod fallback;
pub mod links;
pub mod markdown;
pub mod node;
pub mod profile;
pub mod publications;
pub mod service;

use crate::domain::model::Anchor;
use node::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    /// Replace the anchor content with escaped text.
    SetText(String),
    /// Replace the anchor content with a fragment.
    SetHtml(Vec<Node>),
    SetAttribute { name: &'static str, value: String },
    /// `<li>` inside list containers, `<p>` elsewhere.
    Fallback(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub anchor: Anchor,
    pub op: PatchOp,
}

impl Patch {
    pub fn set_text(anchor: Anchor, text: impl Into<String>) -> Self {
        Self {
            anchor,
            op: PatchOp::SetText(text.into()),
        }
    }

    pub fn set_html(anchor: Anchor, nodes: Vec<Node>) -> Self {
        Self {
            anchor,
            op: PatchOp::SetHtml(nodes),
        }
    }

    pub fn set_attribute(anchor: Anchor, name: &'static str, value: impl Into<String>) -> Self {
        Self {
            anchor,
            op: PatchOp::SetAttribute {
                name,
                value: value.into(),
            },
        }
    }
}
