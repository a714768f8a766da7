pub mod bootstrap;
pub mod engine;
pub mod fetch;
pub mod pipelines;

pub use crate::domain::model::{Anchor, SiteState};
pub use crate::domain::ports::{ConfigProvider, DataPaths, DataSource, MarkdownEngine, Storage};
pub use crate::utils::error::Result;
