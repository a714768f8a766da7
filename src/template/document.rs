use crate::domain::model::Anchor;
use crate::render::fallback::fallback_markup;
use crate::render::node::render_fragment;
use crate::render::{Patch, PatchOp};
use crate::utils::error::{Result, SiteError};
use ego_tree::{NodeId, NodeMut, NodeRef};
use html5ever::{LocalName, Namespace, QualName};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node as DomNode, Selector};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// The host page: an HTML template whose anchors the renderers fill in.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: impl AsRef<str>) -> Self {
        Self {
            html: Html::parse_document(html.as_ref()),
        }
    }

    /// Serializes the whole page, doctype included.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    pub fn has_anchor(&self, anchor: Anchor) -> bool {
        self.element(anchor).is_some()
    }

    /// Lower-cased element name of the anchor, e.g. `ul`.
    pub fn anchor_tag(&self, anchor: Anchor) -> Option<String> {
        self.element(anchor).map(|el| el.value().name().to_string())
    }

    pub fn inner_html(&self, anchor: Anchor) -> Option<String> {
        self.element(anchor).map(|el| el.inner_html())
    }

    pub fn attribute(&self, anchor: Anchor, name: &str) -> Option<String> {
        self.element(anchor)?.attr(name).map(str::to_string)
    }

    /// Applies one patch. Returns `Ok(false)` when the anchor is absent or the
    /// patch has nothing to change on that element.
    pub fn apply(&mut self, patch: &Patch) -> Result<bool> {
        let Some((id, tag)) = self.find(patch.anchor)? else {
            tracing::debug!("Anchor {} not in template, skipping", patch.anchor.selector());
            return Ok(false);
        };

        match &patch.op {
            PatchOp::SetAttribute { name, value } => Ok(self.set_attribute(id, name, value)),
            PatchOp::SetText(text) => Ok(self.replace_content(id, &tag, |node| {
                node.append(DomNode::Text(Text {
                    text: text.as_str().into(),
                }));
            })),
            PatchOp::SetHtml(nodes) => Ok(self.replace_content(id, &tag, |node| {
                append_markup(node, &render_fragment(nodes))
            })),
            PatchOp::Fallback(message) => {
                let markup = fallback_markup(&tag, message).to_html();
                Ok(self.replace_content(id, &tag, |node| append_markup(node, &markup)))
            }
        }
    }

    fn replace_content(
        &mut self,
        id: NodeId,
        tag: &str,
        fill: impl FnOnce(&mut NodeMut<'_, DomNode>),
    ) -> bool {
        if VOID_ELEMENTS.contains(&tag) {
            tracing::debug!("<{}> has no content to replace", tag);
            return false;
        }
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return false;
        };

        while let Some(mut child) = node.first_child() {
            child.detach();
        }
        fill(&mut node);
        true
    }

    fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return false;
        };
        let DomNode::Element(element) = node.value() else {
            return false;
        };

        // 已有同名屬性就原位覆寫，保留屬性順序
        let existing = element
            .attrs
            .iter_mut()
            .find(|(key, _)| (*key.local).eq_ignore_ascii_case(name));
        match existing {
            Some((_, current)) => *current = value.into(),
            None => {
                let key = QualName::new(None, Namespace::from(""), LocalName::from(name));
                element.attrs.insert(key, value.into());
            }
        }
        true
    }

    fn element(&self, anchor: Anchor) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(&anchor.selector()).ok()?;
        self.html.select(&selector).next()
    }

    /// First element carrying the anchor attribute, in document order.
    fn find(&self, anchor: Anchor) -> Result<Option<(NodeId, String)>> {
        let selector = Selector::parse(&anchor.selector()).map_err(|e| SiteError::Template {
            message: format!("Invalid anchor selector {}: {}", anchor.selector(), e),
        })?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .map(|el| (el.id(), el.value().name().to_string())))
    }
}

/// 以 body 為 context 解析片段，再把節點逐一複製進錨點
fn append_markup(target: &mut NodeMut<'_, DomNode>, markup: &str) {
    let fragment = Html::parse_fragment(markup);
    let root = fragment.root_element();
    for child in root.children() {
        let appended = target.append(child.value().clone());
        append_subtree(appended, child);
    }
}

fn append_subtree(mut target: NodeMut<'_, DomNode>, source: NodeRef<'_, DomNode>) {
    for child in source.children() {
        let appended = target.append(child.value().clone());
        append_subtree(appended, child);
    }
}
