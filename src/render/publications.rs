use super::links::{anchor, join_links, opens_new_context};
use super::node::Node;
use super::Patch;
use crate::domain::model::{Anchor, PublicationEntry, PublicationSet};

pub const NO_PUBLICATIONS_MESSAGE: &str = "No publications available yet.";

pub fn render_publications(set: &PublicationSet, owner_name: Option<&str>) -> Vec<Patch> {
    if set.is_empty() {
        let fallback = Node::element("p").child(Node::text(NO_PUBLICATIONS_MESSAGE));
        return vec![Patch::set_html(Anchor::Publications, vec![fallback])];
    }

    // 固定順序：正式發表在前，預印本在後
    let groups = [
        ("Publications", &set.publications),
        ("Preprints", &set.preprints),
    ];

    let content = groups
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(heading, items)| {
            Node::element("div")
                .child(Node::element("h3").child(Node::text(*heading)))
                .children(items.iter().map(|entry| render_entry(entry, owner_name)))
        })
        .collect();

    vec![Patch::set_html(Anchor::Publications, content)]
}

fn render_entry(entry: &PublicationEntry, owner_name: Option<&str>) -> Node {
    let mut block = Node::element("div")
        .attr("class", "pub-entry")
        .child(render_title(entry));

    if let Some(authors) = &entry.authors {
        block = block.child(meta_line(format_authors(authors, owner_name)));
    }

    let venue_bits: Vec<&str> = entry
        .venue
        .as_deref()
        .into_iter()
        .chain(entry.year.as_deref())
        .collect();
    if !venue_bits.is_empty() {
        block = block.child(meta_line(vec![Node::text(venue_bits.join(", "))]));
    }

    if entry.links.len() > 1 {
        let extras = entry
            .links
            .iter()
            .skip(1)
            .map(|link| {
                anchor(
                    link.label.as_deref().unwrap_or_default(),
                    link.url.as_deref().unwrap_or_default(),
                )
            })
            .collect();
        block = block.child(meta_line(join_links(extras)));
    }

    block
}

fn render_title(entry: &PublicationEntry) -> Node {
    let title = Node::element("p");
    match entry.primary_url() {
        Some(url) => {
            let link = Node::element("a").attr("href", url);
            let link = if opens_new_context(url) {
                link.attr("target", "_blank").attr("rel", "noopener noreferrer")
            } else {
                link.attr("target", "_self")
            };
            title.child(link.child(Node::text(entry.title.as_str())))
        }
        None => title.child(Node::text(entry.title.as_str())),
    }
}

fn meta_line(children: Vec<Node>) -> Node {
    Node::element("p").attr("class", "pub-meta").children(children)
}

/// Joins author names with ", ", bolding any name that contains the owner's
/// name. Plain substring test: "Li" also matches "Lim".
pub fn format_authors(authors: &[String], owner_name: Option<&str>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(authors.len() * 2);
    for (i, author) in authors.iter().enumerate() {
        if i > 0 {
            nodes.push(Node::raw(", "));
        }
        match owner_name {
            Some(owner) if author.contains(owner) => {
                nodes.push(Node::element("strong").child(Node::raw(author.as_str())))
            }
            _ => nodes.push(Node::raw(author.as_str())),
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PublicationLink;
    use crate::render::node::render_fragment;
    use crate::render::PatchOp;

    fn html_of(patches: &[Patch]) -> String {
        assert_eq!(patches.len(), 1);
        match &patches[0].op {
            PatchOp::SetHtml(nodes) => render_fragment(nodes),
            other => panic!("unexpected op: {:?}", other),
        }
    }

    fn link(label: &str, url: &str) -> PublicationLink {
        PublicationLink {
            label: Some(label.to_string()),
            url: Some(url.to_string()),
        }
    }

    #[test]
    fn test_empty_set_renders_fallback_paragraph() {
        let html = html_of(&render_publications(&PublicationSet::default(), None));
        assert_eq!(html, "<p>No publications available yet.</p>");
    }

    #[test]
    fn test_authors_bold_owner_name() {
        let authors = vec!["Ada Lovelace".to_string(), "Bob Smith".to_string()];
        let html = render_fragment(&format_authors(&authors, Some("Ada Lovelace")));
        assert_eq!(html, "<strong>Ada Lovelace</strong>, Bob Smith");
    }

    #[test]
    fn test_authors_without_owner_name_are_plain() {
        let authors = vec!["Ada Lovelace".to_string(), "Bob Smith".to_string()];
        let html = render_fragment(&format_authors(&authors, None));
        assert_eq!(html, "Ada Lovelace, Bob Smith");
    }

    #[test]
    fn test_substring_match_also_bolds_longer_names() {
        let authors = vec!["Li".to_string(), "Lim Wei".to_string(), "Chen".to_string()];
        let html = render_fragment(&format_authors(&authors, Some("Li")));
        assert_eq!(html, "<strong>Li</strong>, <strong>Lim Wei</strong>, Chen");
    }

    #[test]
    fn test_entry_with_two_links() {
        let set = PublicationSet {
            publications: vec![PublicationEntry {
                title: "Engines".to_string(),
                links: vec![link("PDF", "https://a"), link("Code", "https://b")],
                ..Default::default()
            }],
            preprints: Vec::new(),
        };

        let html = html_of(&render_publications(&set, None));
        assert_eq!(
            html,
            "<div><h3>Publications</h3><div class=\"pub-entry\">\
             <p><a href=\"https://a\" target=\"_blank\" rel=\"noopener noreferrer\">Engines</a></p>\
             <p class=\"pub-meta\"><a href=\"https://b\" target=\"_blank\" rel=\"noopener noreferrer\">Code</a></p>\
             </div></div>"
        );
    }

    #[test]
    fn test_relative_title_link_stays_in_current_context() {
        let set = PublicationSet {
            publications: Vec::new(),
            preprints: vec![PublicationEntry {
                title: "Draft".to_string(),
                links: vec![link("PDF", "papers/draft.pdf")],
                ..Default::default()
            }],
        };

        let html = html_of(&render_publications(&set, None));
        assert_eq!(
            html,
            "<div><h3>Preprints</h3><div class=\"pub-entry\">\
             <p><a href=\"papers/draft.pdf\" target=\"_self\">Draft</a></p>\
             </div></div>"
        );
    }

    #[test]
    fn test_plain_title_and_venue_year_line() {
        let set = PublicationSet {
            publications: vec![
                PublicationEntry {
                    title: "Sketch <of> a Machine".to_string(),
                    venue: Some("Memoirs".to_string()),
                    year: Some("1843".to_string()),
                    ..Default::default()
                },
                PublicationEntry {
                    title: "Year only".to_string(),
                    year: Some("1842".to_string()),
                    ..Default::default()
                },
            ],
            preprints: Vec::new(),
        };

        let html = html_of(&render_publications(&set, None));
        assert!(html.contains("<p>Sketch &lt;of&gt; a Machine</p><p class=\"pub-meta\">Memoirs, 1843</p>"));
        assert!(html.contains("<p>Year only</p><p class=\"pub-meta\">1842</p>"));
    }

    #[test]
    fn test_groups_keep_fixed_order() {
        let entry = |t: &str| PublicationEntry {
            title: t.to_string(),
            ..Default::default()
        };
        let set = PublicationSet {
            publications: vec![entry("P1"), entry("P2")],
            preprints: vec![entry("R1")],
        };

        let html = html_of(&render_publications(&set, Some("Ada")));
        let p1 = html.find("P1").unwrap();
        let p2 = html.find("P2").unwrap();
        let r1 = html.find("R1").unwrap();
        assert!(html.find("<h3>Publications</h3>").unwrap() < p1);
        assert!(p1 < p2 && p2 < html.find("<h3>Preprints</h3>").unwrap());
        assert!(html.find("<h3>Preprints</h3>").unwrap() < r1);
    }
}
