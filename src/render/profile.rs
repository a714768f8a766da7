use super::links::{anchor, join_links};
use super::node::Node;
use super::Patch;
use crate::domain::model::{Anchor, Profile};

pub const NO_LINKS_MESSAGE: &str = "Reach out for more details.";

pub fn render_profile(profile: &Profile) -> Vec<Patch> {
    let mut patches = vec![
        Patch::set_text(Anchor::ProfileName, profile.name.as_str()),
        Patch::set_text(Anchor::ProfileTagline, profile.tagline.as_str()),
        Patch::set_text(
            Anchor::ProfileLocation,
            profile.location.clone().unwrap_or_default(),
        ),
    ];

    // 沒有頭像時保留模板原本的圖片
    if let Some(headshot) = &profile.headshot {
        patches.push(Patch::set_attribute(
            Anchor::ProfileHeadshot,
            "src",
            headshot.as_str(),
        ));
    }

    let links = build_contact_links(profile);
    let content = if links.is_empty() {
        vec![Node::text(NO_LINKS_MESSAGE)]
    } else {
        join_links(links)
    };
    patches.push(Patch::set_html(Anchor::ProfileLinks, content));

    patches
}

/// Email first, then CV, then the profile's own links in order.
pub fn build_contact_links(profile: &Profile) -> Vec<Node> {
    let mut entries = Vec::new();

    if let Some(email) = &profile.email {
        entries.push(anchor(email, &format!("mailto:{}", email)));
    }

    if let Some(cv) = &profile.cv {
        entries.push(anchor("CV", cv));
    }

    entries.extend(profile.links.iter().map(|link| anchor(&link.label, &link.url)));
    entries
}
