//! Infrastructure layer for model-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileDebateConfig, FileOutputConfig, FileProviderConfig,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::{OpenAiCompatibleGateway, RequestShape, RequestShapeTable};
