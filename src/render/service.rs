use super::node::Node;
use super::Patch;
use crate::domain::model::{Anchor, ServiceList};
use crate::domain::ports::MarkdownEngine;

pub const NO_SERVICE_MESSAGE: &str = "No service entries available yet.";

pub fn render_service(list: &ServiceList, engine: &dyn MarkdownEngine) -> Vec<Patch> {
    let items = if list.items.is_empty() {
        vec![Node::element("li").child(Node::text(NO_SERVICE_MESSAGE))]
    } else {
        list.items
            .iter()
            .map(|entry| Node::element("li").child(Node::raw(engine.to_inline_html(entry))))
            .collect()
    };

    vec![Patch::set_html(Anchor::ServiceList, items)]
}
