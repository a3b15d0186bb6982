use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Port the application listens on inside the container.
pub const APP_PORT: u16 = 8080;

/// Mount point of the workspace inside the container.
pub const WORK_MOUNT: &str = "/work";

/// Subdirectory of the workspace holding the application's cloned projects.
pub const PROJECTS_DIR: &str = "projects";

/// Environment variable carrying [`APP_PORT`] into the container.
pub const PORT_ENV: &str = "PORT";

/// Environment variable carrying [`WORK_MOUNT`] into the container.
pub const WORK_DIR_ENV: &str = "WORK_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host port published when no port argument is given.
    pub port: u16,
    pub image: String,
    pub container_name: String,
    pub workspace: PathBuf,
    pub build_context: PathBuf,
    /// Files that must exist in the build context before building.
    pub required_files: Vec<String>,
    pub docker_binary: String,
    /// Extra `docker build` arguments, shell-quoted.
    pub build_args: Option<String>,
    /// Extra `docker run` arguments, shell-quoted.
    pub run_args: Option<String>,
    /// Where instance-slot lock files live. Defaults to the system temp dir.
    pub lock_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: APP_PORT,
            image: "qgenie:latest".to_string(),
            container_name: "qgenie".to_string(),
            workspace: PathBuf::from("work"),
            build_context: PathBuf::from("."),
            required_files: vec![
                "Dockerfile".to_string(),
                "requirements.txt".to_string(),
                "app.py".to_string(),
            ],
            docker_binary: "docker".to_string(),
            build_args: None,
            run_args: None,
            lock_dir: None,
        }
    }
}
