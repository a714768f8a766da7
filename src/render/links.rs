use super::node::Node;

pub const LINK_SEPARATOR: &str = " \u{00b7} ";

/// 外部連結要在新分頁開啟，且不保留 opener
pub fn opens_new_context(url: &str) -> bool {
    url.starts_with("http")
}

/// Builds `<a href=..>label</a>`; the label is inserted as markup.
pub fn anchor(label: &str, url: &str) -> Node {
    let href = if url.is_empty() { "#" } else { url };
    let node = Node::element("a").attr("href", href);
    let node = if opens_new_context(href) {
        node.attr("target", "_blank").attr("rel", "noopener noreferrer")
    } else {
        node
    };
    node.child(Node::raw(label))
}

pub fn join_links(links: Vec<Node>) -> Vec<Node> {
    let mut joined = Vec::with_capacity(links.len() * 2);
    for (i, link) in links.into_iter().enumerate() {
        if i > 0 {
            joined.push(Node::text(LINK_SEPARATOR));
        }
        joined.push(link);
    }
    joined
}
