use super::CliConfig;
use crate::core::{ConfigProvider, DataPaths};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub site: SiteSection,
    pub template: Option<TemplateSection>,
    pub output: OutputSection,
    #[serde(default)]
    pub data: DataPaths,
    pub render: Option<RenderSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSection {
    pub markdown: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&mut self, cli: &CliConfig) {
        if let Some(base_url) = &cli.base_url {
            self.site.base_url = base_url.clone();
            tracing::info!("🔧 base_url overridden to: {}", base_url);
        }
        if let Some(template) = &cli.template {
            self.template = Some(TemplateSection {
                path: template.clone(),
            });
        }
        if let Some(output) = &cli.output {
            self.output.path = output.clone();
        }
        if cli.no_markdown {
            self.render = Some(RenderSection {
                markdown: Some(false),
            });
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("site.base_url", &self.site.base_url)?;

        let template = validation::validate_required_field("template.path", &self.template)?;
        validation::validate_path("template.path", &template.path)?;
        validation::validate_non_empty_string("output.path", &self.output.path)?;

        validation::validate_relative_path("data.profile", &self.data.profile)?;
        validation::validate_relative_path("data.about", &self.data.about)?;
        validation::validate_relative_path("data.publications", &self.data.publications)?;
        validation::validate_relative_path("data.service", &self.data.service)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.site.base_url
    }

    fn template_path(&self) -> &str {
        self.template
            .as_ref()
            .map(|t| t.path.as_str())
            .unwrap_or(super::DEFAULT_TEMPLATE)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn data_paths(&self) -> &DataPaths {
        &self.data
    }

    fn markdown_enabled(&self) -> bool {
        self.render
            .as_ref()
            .and_then(|r| r.markdown)
            .unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[site]
base_url = "https://ada.example/"

[template]
path = "site/index.html"

[output]
path = "dist/index.html"

[data]
publications = "content/pubs.json"

[render]
markdown = false

[logging]
verbose = true
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.base_url(), "https://ada.example/");
        assert_eq!(config.template_path(), "site/index.html");
        assert_eq!(config.data_paths().publications, "content/pubs.json");
        assert_eq!(config.data_paths().profile, "data/profile.json");
        assert!(!config.markdown_enabled());
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOMEPAGE_TEST_BASE_URL", "https://env.example/");

        let toml_content = r#"
[site]
base_url = "${HOMEPAGE_TEST_BASE_URL}"

[template]
path = "index.html"

[output]
path = "out.html"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.site.base_url, "https://env.example/");

        std::env::remove_var("HOMEPAGE_TEST_BASE_URL");
    }

    #[test]
    fn test_missing_template_fails_validation() {
        let toml_content = r#"
[site]
base_url = "https://ada.example/"

[output]
path = "out.html"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SiteError::MissingConfig { ref field }) if field == "template.path"
        ));
    }

    #[test]
    fn test_absolute_data_path_fails_validation() {
        let toml_content = r#"
[site]
base_url = "https://ada.example/"

[template]
path = "index.html"

[output]
path = "out.html"

[data]
about = "/etc/about.md"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = TomlConfig::from_toml_str(BASIC).unwrap();
        let cli = CliConfig::parse_from([
            "homepage-render",
            "--base-url",
            "http://127.0.0.1:9000/",
            "--output",
            "public/index.html",
        ]);

        config.apply_overrides(&cli);

        assert_eq!(config.base_url(), "http://127.0.0.1:9000/");
        assert_eq!(config.output_path(), "public/index.html");
        assert_eq!(config.template_path(), "site/index.html");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[site\nbase_url = 1");
        assert!(matches!(result, Err(SiteError::ConfigError { .. })));
    }

    #[test]
    fn test_bundled_site_config() {
        std::env::set_var("SITE_BASE_URL", "http://localhost:8000/site/");

        let config = TomlConfig::from_toml_str(include_str!("../../site/homepage.toml")).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000/site/");
        assert_eq!(config.template_path(), "site/index.html");
        assert_eq!(config.data_paths(), &DataPaths::default());
        assert!(config.validate().is_ok());

        std::env::remove_var("SITE_BASE_URL");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "dist/index.html");
    }
}
