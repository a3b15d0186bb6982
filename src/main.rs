use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use qgenie_launcher::bootstrap::{self, BootstrapPlan, BootstrapReport, Lifecycle};
use qgenie_launcher::docker::DockerCli;
use qgenie_launcher::{BootstrapError, config, logging};

/// Build the QGenie image and (re)start its container.
#[derive(Debug, Parser)]
#[command(name = "qgenie-launcher", version, about, long_about = None)]
struct Cli {
    /// Host port to publish (default: 8080, or `port` in .qgenierc)
    port: Option<u16>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(cli) {
        Ok(report) => {
            println!("QGenie is running at {}", report.address());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = match e.downcast_ref::<BootstrapError>() {
                // The runtime already printed its own diagnostic.
                Some(
                    err @ (BootstrapError::Build { .. } | BootstrapError::InstanceCreation { .. }),
                ) => {
                    let step = err.step().map_or("", |s| s.as_str());
                    tracing::error!(step, exit_code = err.exit_code(), "bootstrap failed");
                    err.exit_code()
                }
                Some(err) => {
                    tracing::error!("{e:#}");
                    err.exit_code()
                }
                None => {
                    tracing::error!("{e:#}");
                    1
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<BootstrapReport> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let cfg = config::load(&cwd)?;
    let plan = BootstrapPlan::resolve(&cfg, cli.port)
        .with_context(|| format!("invalid build_args/run_args in {}", config_path(&cwd)))?;

    let lifecycle = cfg.lock_dir.as_deref().map(Lifecycle::new).unwrap_or_default();
    let slot = lifecycle.acquire(&plan.container_name)?;
    let runtime = DockerCli::new(&cfg.docker_binary);

    Ok(bootstrap::run(&runtime, &slot, &plan)?)
}

fn config_path(dir: &Path) -> String {
    dir.join(config::CONFIG_FILE).display().to_string()
}
