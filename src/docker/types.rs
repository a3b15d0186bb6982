/// Describes a runtime invocation. The `args` field is the full argument list
/// passed to `docker` (the bootstrap layer is responsible for assembling it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerCommand {
    pub args: Vec<String>,
    /// Forward the process output to the terminal while it runs.
    pub echo: bool,
}

impl ContainerCommand {
    /// The runtime subcommand, e.g. `build` or `run`.
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }
}

/// Outcome of a finished runtime process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The runtime's own diagnostic: stderr if any, otherwise stdout.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Result of the best-effort removal of a previous instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    /// No instance with the name existed.
    NotFound,
    /// Removal failed for another reason. Tolerated, but reported.
    OtherFailure(String),
}

impl RemovalOutcome {
    /// Classify the output of `docker rm -f`.
    ///
    /// Recent docker CLIs exit 0 from `rm -f` on a missing name and only
    /// print the daemon error, so stderr is checked before the exit code.
    pub fn classify(output: &CommandOutput) -> Self {
        let stderr = output.stderr.to_ascii_lowercase();
        // docker says "No such container", podman says "no container with name or ID".
        if stderr.contains("no such container") || stderr.contains("no container with name") {
            return RemovalOutcome::NotFound;
        }
        if output.success() {
            RemovalOutcome::Removed
        } else {
            RemovalOutcome::OtherFailure(output.diagnostic().to_string())
        }
    }
}
