use super::node::Node;
use super::Patch;
use crate::domain::model::Anchor;
use crate::domain::ports::MarkdownEngine;

pub fn render_about(markdown: &str, engine: &dyn MarkdownEngine) -> Vec<Patch> {
    let html = engine.to_html(markdown);
    vec![Patch::set_html(Anchor::AboutContent, vec![Node::raw(html)])]
}
