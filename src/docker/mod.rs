// Container runtime client: command execution and output capture.

pub mod engine;
pub mod run;
pub mod types;

pub use engine::{DockerCli, Runtime, command_line};
pub use types::{CommandOutput, ContainerCommand, RemovalOutcome};
