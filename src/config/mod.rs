mod loader;
mod types;

pub use loader::{CONFIG_FILE, load};
pub use types::{APP_PORT, Config, PORT_ENV, PROJECTS_DIR, WORK_DIR_ENV, WORK_MOUNT};
