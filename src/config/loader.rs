use std::path::Path;

use anyhow::{Context, Result};

use super::types::Config;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".qgenierc";

/// Load config from a `.qgenierc` file in the given directory.
///
/// A missing file yields [`Config::default`]. Relative paths in the result
/// are resolved against `dir`.
pub fn load(dir: &Path) -> Result<Config> {
    let path = dir.join(CONFIG_FILE);
    let config = if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))?
    } else {
        Config::default()
    };
    Ok(resolve_paths(config, dir))
}

fn resolve_paths(mut config: Config, dir: &Path) -> Config {
    config.workspace = dir.join(&config.workspace);
    config.build_context = dir.join(&config.build_context);
    config.lock_dir = config.lock_dir.map(|p| dir.join(p));
    config
}
