use crate::domain::model::{Anchor, Profile, PublicationSet, ServiceList, SiteState};
use crate::domain::ports::{DataSource, MarkdownEngine};
use crate::render::{about, profile, publications, service, Patch};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Everything a pipeline may read while it runs.
pub struct PipelineContext<'a> {
    pub source: &'a dyn DataSource,
    pub markdown: &'a dyn MarkdownEngine,
    pub state: &'a SiteState,
}

/// One fetch-then-render sequence for a section of the page.
#[async_trait]
pub trait ContentPipeline: Send + Sync {
    fn name(&self) -> &'static str;

    /// Where the fallback goes when this pipeline fails.
    fn fallback_anchor(&self) -> Anchor;

    fn fallback_message(&self) -> &'static str;

    async fn render(&self, ctx: &PipelineContext<'_>) -> Result<Vec<Patch>>;
}

async fn fetch_typed<T: DeserializeOwned>(source: &dyn DataSource, path: &str) -> Result<T> {
    let value = source.fetch_json(path).await?;
    serde_json::from_value(value).map_err(|source| SiteError::Decode {
        path: path.to_string(),
        source,
    })
}

pub struct ProfilePipeline {
    pub path: String,
}

#[async_trait]
impl ContentPipeline for ProfilePipeline {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn fallback_anchor(&self) -> Anchor {
        Anchor::ProfileName
    }

    fn fallback_message(&self) -> &'static str {
        "Profile unavailable"
    }

    async fn render(&self, ctx: &PipelineContext<'_>) -> Result<Vec<Patch>> {
        let profile: Profile = fetch_typed(ctx.source, &self.path).await?;

        if ctx.state.publish_owner_name(&profile.name) {
            tracing::debug!("Owner name published: {}", profile.name);
        }

        Ok(profile::render_profile(&profile))
    }
}

pub struct AboutPipeline {
    pub path: String,
}

#[async_trait]
impl ContentPipeline for AboutPipeline {
    fn name(&self) -> &'static str {
        "about"
    }

    fn fallback_anchor(&self) -> Anchor {
        Anchor::AboutContent
    }

    fn fallback_message(&self) -> &'static str {
        "About section coming soon."
    }

    async fn render(&self, ctx: &PipelineContext<'_>) -> Result<Vec<Patch>> {
        let markdown = ctx.source.fetch_text(&self.path).await?;
        Ok(about::render_about(&markdown, ctx.markdown))
    }
}

pub struct PublicationsPipeline {
    pub path: String,
}

#[async_trait]
impl ContentPipeline for PublicationsPipeline {
    fn name(&self) -> &'static str {
        "publications"
    }

    fn fallback_anchor(&self) -> Anchor {
        Anchor::Publications
    }

    fn fallback_message(&self) -> &'static str {
        publications::NO_PUBLICATIONS_MESSAGE
    }

    async fn render(&self, ctx: &PipelineContext<'_>) -> Result<Vec<Patch>> {
        let set: PublicationSet = fetch_typed(ctx.source, &self.path).await?;

        // profile 可能尚未完成或已失敗，此時不加粗任何作者
        let owner_name = ctx.state.owner_name();
        if owner_name.is_none() {
            tracing::debug!("Owner name not published yet, authors stay plain");
        }

        Ok(publications::render_publications(&set, owner_name))
    }
}

pub struct ServicePipeline {
    pub path: String,
}

#[async_trait]
impl ContentPipeline for ServicePipeline {
    fn name(&self) -> &'static str {
        "service"
    }

    fn fallback_anchor(&self) -> Anchor {
        Anchor::ServiceList
    }

    fn fallback_message(&self) -> &'static str {
        service::NO_SERVICE_MESSAGE
    }

    async fn render(&self, ctx: &PipelineContext<'_>) -> Result<Vec<Patch>> {
        let list: ServiceList = fetch_typed(ctx.source, &self.path).await?;
        Ok(service::render_service(&list, ctx.markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markdown::PassThrough;
    use std::collections::HashMap;

    struct MockSource {
        files: HashMap<&'static str, &'static str>,
    }

    #[async_trait]
    impl DataSource for MockSource {
        async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
            let text = self.fetch_text(path).await?;
            Ok(serde_json::from_str(&text)?)
        }

        async fn fetch_text(&self, path: &str) -> Result<String> {
            self.files
                .get(path)
                .map(|s| s.to_string())
                .ok_or_else(|| SiteError::Status {
                    path: path.to_string(),
                    status: 404,
                })
        }
    }

    fn source(files: &[(&'static str, &'static str)]) -> MockSource {
        MockSource {
            files: files.iter().copied().collect(),
        }
    }

    #[tokio::test]
    async fn test_profile_pipeline_publishes_owner_name() {
        let source = source(&[("p.json", r#"{"name": "Ada Lovelace", "tagline": "Analyst"}"#)]);
        let state = SiteState::new();
        let ctx = PipelineContext {
            source: &source,
            markdown: &PassThrough,
            state: &state,
        };

        let patches = ProfilePipeline { path: "p.json".into() }
            .render(&ctx)
            .await
            .unwrap();

        assert_eq!(state.owner_name(), Some("Ada Lovelace"));
        assert!(patches.contains(&Patch::set_text(Anchor::ProfileName, "Ada Lovelace")));
    }

    #[tokio::test]
    async fn test_profile_without_name_leaves_owner_unset() {
        let source = source(&[("p.json", r#"{"tagline": "Analyst"}"#)]);
        let state = SiteState::new();
        let ctx = PipelineContext {
            source: &source,
            markdown: &PassThrough,
            state: &state,
        };

        ProfilePipeline { path: "p.json".into() }
            .render(&ctx)
            .await
            .unwrap();
        assert!(state.owner_name().is_none());
    }

    #[tokio::test]
    async fn test_wrong_top_level_shape_is_decode_error() {
        let source = source(&[("pubs.json", r#""just a string""#)]);
        let state = SiteState::new();
        let ctx = PipelineContext {
            source: &source,
            markdown: &PassThrough,
            state: &state,
        };

        let err = PublicationsPipeline { path: "pubs.json".into() }
            .render(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::Decode { ref path, .. } if path == "pubs.json"));
    }

    #[tokio::test]
    async fn test_missing_file_propagates_status_error() {
        let source = source(&[]);
        let state = SiteState::new();
        let ctx = PipelineContext {
            source: &source,
            markdown: &PassThrough,
            state: &state,
        };

        let err = AboutPipeline { path: "about.md".into() }
            .render(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::Status { status: 404, .. }));
    }

    #[test]
    fn test_fallback_contract() {
        let profile = ProfilePipeline { path: String::new() };
        let about = AboutPipeline { path: String::new() };
        let pubs = PublicationsPipeline { path: String::new() };
        let service = ServicePipeline { path: String::new() };

        assert_eq!(profile.fallback_anchor(), Anchor::ProfileName);
        assert_eq!(profile.fallback_message(), "Profile unavailable");
        assert_eq!(about.fallback_message(), "About section coming soon.");
        assert_eq!(pubs.fallback_message(), "No publications available yet.");
        assert_eq!(service.fallback_anchor(), Anchor::ServiceList);
        assert_eq!(service.fallback_message(), "No service entries available yet.");
    }
}
