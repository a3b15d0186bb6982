pub mod bootstrap;
pub mod config;
pub mod docker;
pub mod error;
pub mod logging;

pub use error::{BootstrapError, Result};
