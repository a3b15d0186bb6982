use tracing::{debug, info, warn};

use crate::docker::{CommandOutput, ContainerCommand, RemovalOutcome, Runtime};
use crate::error::{BootstrapError, Result};

use super::commands::{build_command, remove_command, run_command};
use super::lock::InstanceSlot;
use super::types::{BootstrapPlan, BootstrapReport, Step};
use super::workspace;

/// Bring exactly one instance of the application online.
///
/// Steps run strictly in order: provision the workspace, build the image,
/// remove any previous instance, create the new one. The first fatal error
/// aborts the rest; nothing is rolled back. Removal never fails the run, its
/// outcome is reported instead.
///
/// The `slot` ties the run to an exclusive claim on the container name.
pub fn run<R: Runtime>(
    runtime: &R,
    slot: &InstanceSlot,
    plan: &BootstrapPlan,
) -> Result<BootstrapReport> {
    if slot.name() != plan.container_name {
        return Err(BootstrapError::SlotMismatch {
            held: slot.name().to_string(),
            requested: plan.container_name.clone(),
        });
    }
    debug!(step = %Step::ResolvePort, port = plan.host_port, "resolved host port");

    // ── Workspace ─────────────────────────────────────────────────────
    let projects_dir = workspace::absolute(&plan.projects_dir())?;
    info!(
        step = %Step::ProvisionWorkspace,
        path = %projects_dir.display(),
        "ensuring workspace"
    );
    workspace::provision(&projects_dir)?;

    let mut plan = plan.clone();
    plan.workspace = workspace::absolute(&plan.workspace)?;

    // ── Build ─────────────────────────────────────────────────────────
    info!(step = %Step::BuildImage, image = %plan.image_tag, "building image");
    workspace::check_build_context(&plan.build_context, &plan.required_files)?;
    let output = execute(runtime, Step::BuildImage, &build_command(&plan))?;
    if !output.success() {
        return Err(BootstrapError::Build {
            exit_code: output.exit_code,
            diagnostic: output.diagnostic().to_string(),
        });
    }

    // ── Remove previous ───────────────────────────────────────────────
    let removal = remove_previous(runtime, &plan);

    // ── Create ────────────────────────────────────────────────────────
    info!(
        step = %Step::CreateInstance,
        name = %plan.container_name,
        port = plan.host_port,
        "starting container"
    );
    let output = execute(runtime, Step::CreateInstance, &run_command(&plan))?;
    if !output.success() {
        return Err(BootstrapError::InstanceCreation {
            exit_code: output.exit_code,
            diagnostic: output.diagnostic().to_string(),
        });
    }

    Ok(BootstrapReport {
        host_port: plan.host_port,
        container_name: plan.container_name,
        container_id: output.stdout.trim().to_string(),
        removal,
    })
}

fn remove_previous<R: Runtime>(runtime: &R, plan: &BootstrapPlan) -> RemovalOutcome {
    let step = Step::RemovePrevious;
    let outcome = match runtime.execute(&remove_command(plan)) {
        Ok(output) => RemovalOutcome::classify(&output),
        Err(e) => {
            RemovalOutcome::OtherFailure(format!("failed to invoke {}: {e}", runtime.program()))
        }
    };

    match &outcome {
        RemovalOutcome::Removed => {
            info!(step = %step, name = %plan.container_name, "removed previous container")
        }
        RemovalOutcome::NotFound => {
            debug!(step = %step, name = %plan.container_name, "no previous container")
        }
        RemovalOutcome::OtherFailure(reason) => warn!(
            step = %step,
            name = %plan.container_name,
            %reason,
            "could not remove previous container, continuing"
        ),
    }
    outcome
}

fn execute<R: Runtime>(runtime: &R, step: Step, cmd: &ContainerCommand) -> Result<CommandOutput> {
    runtime
        .execute(cmd)
        .map_err(|source| BootstrapError::Spawn {
            program: runtime.program().to_string(),
            step,
            source,
        })
}
