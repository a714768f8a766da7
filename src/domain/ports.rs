use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn template_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn data_paths(&self) -> &DataPaths;
    fn markdown_enabled(&self) -> bool;
}

/// 四個資料檔相對於 base URL 的路徑
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DataPaths {
    #[serde(default = "DataPaths::default_profile")]
    pub profile: String,
    #[serde(default = "DataPaths::default_about")]
    pub about: String,
    #[serde(default = "DataPaths::default_publications")]
    pub publications: String,
    #[serde(default = "DataPaths::default_service")]
    pub service: String,
}

impl DataPaths {
    fn default_profile() -> String {
        "data/profile.json".to_string()
    }

    fn default_about() -> String {
        "data/about.md".to_string()
    }

    fn default_publications() -> String {
        "data/publications.json".to_string()
    }

    fn default_service() -> String {
        "data/service.json".to_string()
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            profile: Self::default_profile(),
            about: Self::default_about(),
            publications: Self::default_publications(),
            service: Self::default_service(),
        }
    }
}

/// Where page content comes from. Paths are relative to the source root.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value>;
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Markdown conversion capability injected into the about and service renderers.
pub trait MarkdownEngine: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
    fn to_inline_html(&self, markdown: &str) -> String;
}
