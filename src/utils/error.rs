use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request for {path} failed with {status}")]
    Status { path: String, status: u16 },

    #[error("Malformed payload in {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::Transport(_) | SiteError::Status { .. } => ErrorCategory::Network,
            SiteError::Decode { .. } | SiteError::Serialization(_) | SiteError::Template { .. } => {
                ErrorCategory::Data
            }
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValue { .. }
            | SiteError::MissingConfig { .. } => ErrorCategory::Config,
            SiteError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一資料檔失敗只影響該區塊
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::Transport(_) => "Could not reach the content server".to_string(),
            SiteError::Status { path, status } => {
                format!("The server answered {} for {}", status, path)
            }
            SiteError::Decode { path, .. } => format!("{} is not valid JSON content", path),
            SiteError::Serialization(_) => "Content could not be serialized".to_string(),
            SiteError::Io(e) => format!("File system error: {}", e),
            SiteError::Template { message } => format!("Template problem: {}", message),
            SiteError::ConfigError { message } => format!("Configuration problem: {}", message),
            SiteError::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            SiteError::MissingConfig { field } => format!("Setting '{}' is required", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SiteError::Transport(_) => "Check the base URL and that the content server is running",
            SiteError::Status { .. } => "Make sure the data file is deployed under the base URL",
            SiteError::Decode { .. } | SiteError::Serialization(_) => {
                "Validate the data file with a JSON linter"
            }
            SiteError::Io(_) => "Check that the template exists and the output directory is writable",
            SiteError::Template { .. } => "Check that the template is well-formed HTML",
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValue { .. }
            | SiteError::MissingConfig { .. } => "Review the command line flags or the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
