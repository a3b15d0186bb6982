pub mod commands;
mod lock;
pub mod orchestrator;
mod types;
pub mod workspace;

pub use lock::{InstanceSlot, Lifecycle, is_valid_name};
pub use orchestrator::run;
pub use types::{BootstrapPlan, BootstrapReport, Step};
