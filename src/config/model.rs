// src/config/model.rs

use serde::Deserialize;

/// Top-level project configuration as read from a TOML file.
///
/// ```toml
/// [service]
/// name = "web"
/// artifact_dir = "dist"
///
/// [publish]
/// tool = "az"
/// args = ["webapp", "deploy", "--name", "web"]
///
/// [pipeline]
/// remote_name = "origin"
/// ```
///
/// Only `[service]` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    /// The service this project deploys, from `[service]`.
    pub service: ServiceSection,

    /// How to publish the packaged artifact, from `[publish]`.
    #[serde(default)]
    pub publish: PublishSection,

    /// Deployment pipeline settings, from `[pipeline]`.
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// `[service]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSection {
    /// Service name; used to name the deployment archive.
    pub name: String,

    /// Directory containing the build output to package.
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,
}

fn default_artifact_dir() -> String {
    "dist".to_string()
}

/// `[publish]` section.
///
/// The publish operation invokes `tool` with `args` plus the archive path
/// appended. A deployment token, when present, is passed via
/// `--deployment-token` and is covered by the redaction rules in logs and
/// enriched errors.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishSection {
    /// Cloud provider CLI to invoke, e.g. `az` or `swa`.
    #[serde(default = "default_publish_tool")]
    pub tool: String,

    /// Arguments placed before the archive path.
    #[serde(default)]
    pub args: Vec<String>,

    /// Optional deployment token forwarded to the tool.
    #[serde(default)]
    pub deployment_token: Option<String>,

    /// Optional invocation whose stdout lines are the service endpoints,
    /// fetched after a successful publish.
    #[serde(default)]
    pub endpoints_args: Option<Vec<String>>,
}

fn default_publish_tool() -> String {
    "az".to_string()
}

impl Default for PublishSection {
    fn default() -> Self {
        Self {
            tool: default_publish_tool(),
            args: Vec::new(),
            deployment_token: None,
            endpoints_args: None,
        }
    }
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSection {
    /// Git remote the pipeline is configured against.
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// Service principal granted access to cloud resources by the pipeline.
    #[serde(default)]
    pub principal_name: Option<String>,

    /// Role assigned to the service principal.
    #[serde(default = "default_role_name")]
    pub role_name: String,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_role_name() -> String {
    "Contributor".to_string()
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            remote_name: default_remote_name(),
            principal_name: None,
            role_name: default_role_name(),
        }
    }
}
