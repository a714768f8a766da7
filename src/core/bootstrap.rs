use super::pipelines::{
    AboutPipeline, ContentPipeline, PipelineContext, ProfilePipeline, PublicationsPipeline,
    ServicePipeline,
};
use crate::domain::model::{Anchor, SiteState};
use crate::domain::ports::{DataPaths, DataSource, MarkdownEngine};
use crate::render::fallback::show_fallback;
use crate::render::Patch;
use crate::template::Document;
use chrono::Datelike;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineStatus {
    Rendered,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub pipeline: &'static str,
    #[serde(flatten)]
    pub status: PipelineStatus,
}

/// 各區塊的執行結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub pipelines: Vec<PipelineReport>,
    pub footer_year: Option<i32>,
}

impl RenderReport {
    pub fn failed(&self) -> impl Iterator<Item = &PipelineReport> {
        self.pipelines
            .iter()
            .filter(|r| matches!(r.status, PipelineStatus::Failed { .. }))
    }

    pub fn all_rendered(&self) -> bool {
        self.failed().next().is_none()
    }

    pub fn status_of(&self, pipeline: &str) -> Option<&PipelineStatus> {
        self.pipelines
            .iter()
            .find(|r| r.pipeline == pipeline)
            .map(|r| &r.status)
    }
}

struct PipelineOutcome {
    report: PipelineReport,
    patches: Vec<Patch>,
}

/// Runs the four content pipelines against a document.
pub struct Bootstrapper {
    source: Box<dyn DataSource>,
    markdown: Box<dyn MarkdownEngine>,
    paths: DataPaths,
    year: Option<i32>,
}

impl Bootstrapper {
    pub fn new(
        source: Box<dyn DataSource>,
        markdown: Box<dyn MarkdownEngine>,
        paths: DataPaths,
    ) -> Self {
        Self {
            source,
            markdown,
            paths,
            year: None,
        }
    }

    /// Pins the footer year instead of reading the clock.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub async fn run(&self, document: &mut Document) -> RenderReport {
        let mut report = RenderReport::default();
        let mut patches = Vec::new();

        // 頁尾年份先處理
        if document.has_anchor(Anchor::FooterYear) {
            let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
            patches.push(Patch::set_text(Anchor::FooterYear, year.to_string()));
            report.footer_year = Some(year);
        }

        let state = SiteState::new();
        let ctx = PipelineContext {
            source: self.source.as_ref(),
            markdown: self.markdown.as_ref(),
            state: &state,
        };

        let profile = ProfilePipeline {
            path: self.paths.profile.clone(),
        };
        let about = AboutPipeline {
            path: self.paths.about.clone(),
        };
        let publications = PublicationsPipeline {
            path: self.paths.publications.clone(),
        };
        let service = ServicePipeline {
            path: self.paths.service.clone(),
        };

        // 四條 pipeline 同時執行，互不等待
        let outcomes = tokio::join!(
            run_pipeline(&profile, &ctx),
            run_pipeline(&about, &ctx),
            run_pipeline(&publications, &ctx),
            run_pipeline(&service, &ctx),
        );

        for outcome in [outcomes.0, outcomes.1, outcomes.2, outcomes.3] {
            report.pipelines.push(outcome.report);
            patches.extend(outcome.patches);
        }

        for patch in &patches {
            if let Err(e) = document.apply(patch) {
                tracing::warn!(
                    "⚠️ Could not patch {}: {}",
                    patch.anchor.selector(),
                    e
                );
            }
        }

        report
    }
}

async fn run_pipeline<P: ContentPipeline>(pipeline: &P, ctx: &PipelineContext<'_>) -> PipelineOutcome {
    match pipeline.render(ctx).await {
        Ok(patches) => {
            tracing::info!("✅ Rendered {} ({} patches)", pipeline.name(), patches.len());
            PipelineOutcome {
                report: PipelineReport {
                    pipeline: pipeline.name(),
                    status: PipelineStatus::Rendered,
                },
                patches,
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Failed to load {} (Category: {:?}): {}",
                pipeline.name(),
                e.category(),
                e
            );
            PipelineOutcome {
                report: PipelineReport {
                    pipeline: pipeline.name(),
                    status: PipelineStatus::Failed {
                        error: e.to_string(),
                    },
                },
                patches: vec![show_fallback(
                    pipeline.fallback_anchor(),
                    pipeline.fallback_message(),
                )],
            }
        }
    }
}
