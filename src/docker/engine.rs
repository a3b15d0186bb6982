use tracing::debug;

use super::run;
use super::types::{CommandOutput, ContainerCommand};

/// A container runtime that can execute assembled commands.
///
/// The bootstrap pipeline only talks to the runtime through this trait, so
/// each step can be exercised against a scripted implementation.
pub trait Runtime {
    /// Program name used in diagnostics.
    fn program(&self) -> &str;

    /// Execute the command and wait for it. `Err` means the runtime could
    /// not be invoked at all; a non-zero exit is reported in the output.
    fn execute(&self, cmd: &ContainerCommand) -> std::io::Result<CommandOutput>;
}

/// Shells out to the `docker` CLI (or a compatible binary such as `podman`).
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl Runtime for DockerCli {
    fn program(&self) -> &str {
        &self.binary
    }

    fn execute(&self, cmd: &ContainerCommand) -> std::io::Result<CommandOutput> {
        debug!(command = %command_line(&self.binary, cmd), "invoking runtime");
        let output = run::exec(&self.binary, cmd)?;
        debug!(exit_code = ?output.exit_code, "runtime exited");
        Ok(output)
    }
}

/// Shell-quoted rendering of the full command, for logs.
pub fn command_line(program: &str, cmd: &ContainerCommand) -> String {
    let mut words = Vec::with_capacity(cmd.args.len() + 1);
    words.push(program);
    words.extend(cmd.args.iter().map(String::as_str));
    shell_words::join(words)
}
