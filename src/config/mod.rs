pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, DataPaths};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";
pub const DEFAULT_TEMPLATE: &str = "index.html";
pub const DEFAULT_OUTPUT: &str = "dist/index.html";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "homepage-render")]
#[command(about = "Render an academic homepage from its JSON and Markdown data files")]
pub struct CliConfig {
    /// Base URL the data/ directory is served from
    #[arg(long)]
    pub base_url: Option<String>,

    /// HTML template containing the data-* anchors
    #[arg(long)]
    pub template: Option<String>,

    /// Where the rendered page is written
    #[arg(long)]
    pub output: Option<String>,

    /// TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Insert about/service text without markdown conversion
    #[arg(long)]
    pub no_markdown: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Show what would be fetched without rendering
    #[arg(long)]
    pub dry_run: bool,

    #[arg(skip)]
    #[serde(skip)]
    pub data_paths: DataPaths,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn template_path(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    fn output_path(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    fn data_paths(&self) -> &DataPaths {
        &self.data_paths
    }

    fn markdown_enabled(&self) -> bool {
        !self.no_markdown
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", self.base_url())?;
        validate_path("template", self.template_path())?;
        validate_non_empty_string("output", self.output_path())?;
        Ok(())
    }
}
