use crate::config::{APP_PORT, PORT_ENV, WORK_DIR_ENV, WORK_MOUNT};
use crate::docker::ContainerCommand;

use super::types::BootstrapPlan;

/// Build a `docker build` command tagging the image from the build context.
pub fn build_command(plan: &BootstrapPlan) -> ContainerCommand {
    let mut args = vec!["build".into(), "-t".into(), plan.image_tag.clone()];
    args.extend(plan.build_args.iter().cloned());
    args.push(plan.build_context.display().to_string());

    ContainerCommand { args, echo: true }
}

/// Build a `docker rm -f` command for the reserved container name.
pub fn remove_command(plan: &BootstrapPlan) -> ContainerCommand {
    ContainerCommand {
        args: vec!["rm".into(), "-f".into(), plan.container_name.clone()],
        echo: false,
    }
}

/// Build a detached `docker run` command with the port, environment and
/// workspace wiring the application expects.
pub fn run_command(plan: &BootstrapPlan) -> ContainerCommand {
    let mut args = vec![
        "run".into(),
        "-d".into(),
        "--name".into(),
        plan.container_name.clone(),
        "-p".into(),
        format!("{}:{APP_PORT}", plan.host_port),
        "-e".into(),
        format!("{PORT_ENV}={APP_PORT}"),
        "-e".into(),
        format!("{WORK_DIR_ENV}={WORK_MOUNT}"),
        "--mount".into(),
        format!(
            "type=bind,{},target={WORK_MOUNT}",
            mount_field("source", &plan.workspace.display().to_string())
        ),
    ];
    args.extend(plan.run_args.iter().cloned());
    args.push(plan.image_tag.clone());

    ContainerCommand { args, echo: true }
}

/// One `key=value` field of a `--mount` spec. The runtime parses the spec as
/// CSV, so values with commas or quotes are wrapped and their quotes doubled.
fn mount_field(key: &str, value: &str) -> String {
    if value.contains([',', '"']) {
        format!("\"{key}={}\"", value.replace('"', "\"\""))
    } else {
        format!("{key}={value}")
    }
}
