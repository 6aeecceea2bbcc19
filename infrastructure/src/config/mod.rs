//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileEndpointConfig, FileOutputConfig, FileWorkflowConfig};
pub use loader::ConfigLoader;
