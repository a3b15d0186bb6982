//! Error types for the bootstrap pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::bootstrap::Step;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("failed to create directory {}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("build context is missing {}", .path.display())]
    MissingBuildFile { path: PathBuf },

    #[error("image build failed{}: {diagnostic}", exit_suffix(.exit_code))]
    Build {
        exit_code: Option<i32>,
        diagnostic: String,
    },

    #[error("container creation failed{}: {diagnostic}", exit_suffix(.exit_code))]
    InstanceCreation {
        exit_code: Option<i32>,
        diagnostic: String,
    },

    #[error("failed to invoke `{program}` during {step}")]
    Spawn {
        program: String,
        step: Step,
        source: std::io::Error,
    },

    #[error("container name '{name}' is held by another launcher")]
    Contention { name: String },

    #[error("instance slot for '{held}' does not cover container '{requested}'")]
    SlotMismatch { held: String, requested: String },

    #[error("invalid container name '{name}'")]
    InvalidName { name: String },

    #[error("failed to lock {}", .path.display())]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit {code})"),
        None => " (terminated by signal)".to_string(),
    }
}

impl BootstrapError {
    /// The step that failed. `None` for slot errors raised before the pipeline.
    pub fn step(&self) -> Option<Step> {
        match self {
            BootstrapError::DirectoryCreation { .. } => Some(Step::ProvisionWorkspace),
            BootstrapError::MissingBuildFile { .. } | BootstrapError::Build { .. } => {
                Some(Step::BuildImage)
            }
            BootstrapError::InstanceCreation { .. } => Some(Step::CreateInstance),
            BootstrapError::Spawn { step, .. } => Some(*step),
            BootstrapError::Contention { .. }
            | BootstrapError::SlotMismatch { .. }
            | BootstrapError::InvalidName { .. }
            | BootstrapError::Lock { .. } => None,
        }
    }

    /// Process exit status for this failure: the runtime tool's own status
    /// where there is one.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::Build { exit_code, .. }
            | BootstrapError::InstanceCreation { exit_code, .. } => match exit_code {
                Some(code) if *code != 0 => *code,
                _ => 1,
            },
            BootstrapError::Spawn { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                127
            }
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
