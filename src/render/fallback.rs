use super::node::Node;
use super::{Patch, PatchOp};
use crate::domain::model::Anchor;

/// Placeholder for an anchor whose pipeline failed. The markup is chosen when
/// the patch is applied, since it depends on the anchor's element.
pub fn show_fallback(anchor: Anchor, message: impl Into<String>) -> Patch {
    Patch {
        anchor,
        op: PatchOp::Fallback(message.into()),
    }
}

pub fn is_list_container(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("ul") || tag.eq_ignore_ascii_case("ol")
}

pub fn fallback_markup(tag: &str, message: &str) -> Node {
    let wrapper = if is_list_container(tag) { "li" } else { "p" };
    Node::element(wrapper).child(Node::text(message))
}
