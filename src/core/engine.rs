use super::bootstrap::{Bootstrapper, RenderReport};
use super::fetch::HttpFetcher;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::render::markdown::engine_for;
use crate::template::Document;
use crate::utils::error::{Result, SiteError};

#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub output_path: String,
    pub report: RenderReport,
}

/// Reads the template, fills it in, writes the finished page.
pub struct SiteEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    year: Option<i32>,
}

impl<S: Storage, C: ConfigProvider> SiteEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            year: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub async fn run(&self) -> Result<RenderOutput> {
        tracing::info!("Starting page render...");

        // Load template
        tracing::info!("📄 Reading template {}", self.config.template_path());
        let raw = self.storage.read_file(self.config.template_path()).await?;
        let html = String::from_utf8(raw).map_err(|e| SiteError::Template {
            message: format!("{} is not UTF-8: {}", self.config.template_path(), e),
        })?;
        let mut document = Document::parse(html);

        // Render
        tracing::info!("🌐 Fetching content from {}", self.config.base_url());
        let fetcher = HttpFetcher::new(self.config.base_url())?;
        let mut bootstrapper = Bootstrapper::new(
            Box::new(fetcher),
            engine_for(self.config.markdown_enabled()),
            self.config.data_paths().clone(),
        );
        if let Some(year) = self.year {
            bootstrapper = bootstrapper.with_year(year);
        }
        let report = bootstrapper.run(&mut document).await;

        for failed in report.failed() {
            tracing::warn!("⚠️ {} fell back to placeholder content", failed.pipeline);
        }

        // Write
        let output_path = self.config.output_path().to_string();
        tracing::info!("💾 Writing page to {}", output_path);
        self.storage
            .write_file(&output_path, document.to_html().as_bytes())
            .await?;

        Ok(RenderOutput {
            output_path,
            report,
        })
    }
}
