use std::fmt;
use std::path::PathBuf;

use crate::config::{Config, PROJECTS_DIR};
use crate::docker::RemovalOutcome;

/// Identifies which bootstrap step is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ResolvePort,
    ProvisionWorkspace,
    BuildImage,
    RemovePrevious,
    CreateInstance,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ResolvePort => "resolve-port",
            Step::ProvisionWorkspace => "provision-workspace",
            Step::BuildImage => "build-image",
            Step::RemovePrevious => "remove-previous",
            Step::CreateInstance => "create-instance",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved input to the bootstrap pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPlan {
    pub host_port: u16,
    pub image_tag: String,
    pub container_name: String,
    pub workspace: PathBuf,
    pub build_context: PathBuf,
    pub required_files: Vec<String>,
    pub build_args: Vec<String>,
    pub run_args: Vec<String>,
}

impl BootstrapPlan {
    /// Resolve the plan from config and the optional port argument.
    ///
    /// An explicit port wins over the configured default. The only failure
    /// is an unparsable `build_args`/`run_args` string.
    pub fn resolve(config: &Config, port: Option<u16>) -> Result<Self, shell_words::ParseError> {
        Ok(Self {
            host_port: port.unwrap_or(config.port),
            image_tag: config.image.clone(),
            container_name: config.container_name.clone(),
            workspace: config.workspace.clone(),
            build_context: config.build_context.clone(),
            required_files: config.required_files.clone(),
            build_args: split_args(config.build_args.as_deref())?,
            run_args: split_args(config.run_args.as_deref())?,
        })
    }

    /// The nested directory the application keeps its projects in.
    pub fn projects_dir(&self) -> PathBuf {
        self.workspace.join(PROJECTS_DIR)
    }
}

fn split_args(raw: Option<&str>) -> Result<Vec<String>, shell_words::ParseError> {
    match raw {
        Some(raw) => shell_words::split(raw),
        None => Ok(Vec::new()),
    }
}

/// Outcome of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub host_port: u16,
    pub container_name: String,
    /// Id printed by the runtime for the new instance.
    pub container_id: String,
    pub removal: RemovalOutcome,
}

impl BootstrapReport {
    /// Externally reachable address of the instance.
    pub fn address(&self) -> String {
        format!("http://localhost:{}", self.host_port)
    }
}
