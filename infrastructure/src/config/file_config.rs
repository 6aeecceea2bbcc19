//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and are deserialized directly.
//!
//! # Example
//!
//! ```toml
//! [endpoint]
//! base_url = "http://localhost:8080/v1"
//! model = "qwen2.5-coder"
//! api_key_env = "CONCLAVE_API_KEY"
//! timeout_secs = 60
//!
//! [workflow]
//! max_rounds = 5
//!
//! [output]
//! transcript = "conclave.transcript.log"
//! artifact = "final_fixed_code.py"
//! ```

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion endpoint settings
    pub endpoint: FileEndpointConfig,
    /// Workflow settings
    pub workflow: FileWorkflowConfig,
    /// Output paths
    pub output: FileOutputConfig,
}

/// Completion endpoint configuration (`[endpoint]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Environment variable holding the API key (optional key if unset)
    pub api_key_env: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Workflow configuration (`[workflow]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// Maximum review rounds before giving up
    pub max_rounds: usize,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self { max_rounds: 5 }
    }
}

/// Output path configuration (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Transcript file (append-only)
    pub transcript: String,
    /// Final artifact file (overwritten each run)
    pub artifact: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            transcript: "conclave.transcript.log".to_string(),
            artifact: "final_fixed_code.py".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.workflow.max_rounds, 5);
        assert_eq!(config.endpoint.timeout_secs, 60);
        assert_eq!(config.output.artifact, "final_fixed_code.py");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [endpoint]
            base_url = "http://localhost:8080/v1"
            model = "local-coder"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoint.base_url, "http://localhost:8080/v1");
        assert_eq!(config.endpoint.model, "local-coder");
        // Untouched sections keep their defaults.
        assert_eq!(config.endpoint.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.workflow.max_rounds, 5);
    }

    #[test]
    fn test_full_toml_roundtrip() {
        let config: FileConfig = toml::from_str(
            r#"
            [endpoint]
            base_url = "https://proxy/v1"
            model = "m"
            api_key_env = "MY_KEY"
            timeout_secs = 10

            [workflow]
            max_rounds = 3

            [output]
            transcript = "t.log"
            artifact = "out.py"
            "#,
        )
        .unwrap();

        assert_eq!(config.workflow.max_rounds, 3);
        assert_eq!(config.output.transcript, "t.log");
        assert_eq!(config.endpoint.timeout_secs, 10);
    }
}
