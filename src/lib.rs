pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod template;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{
    bootstrap::{Bootstrapper, RenderReport},
    engine::{RenderOutput, SiteEngine},
    fetch::HttpFetcher,
};
pub use template::Document;
pub use utils::error::{Result, SiteError};
