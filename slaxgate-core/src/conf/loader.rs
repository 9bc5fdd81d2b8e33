use crate::conf::ConfigError;
use crate::conf::types::{ConfigFile, RuntimeConfig};
use crate::viewer::ViewerRoot;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(&s, path)
}

/// Parses and validates config text. `origin` is only used in errors.
pub fn parse_config(s: &str, origin: &Path) -> Result<RuntimeConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: syntax and unknown fields
    //--------------------------------------------------------------------------
    let parsed: ConfigFile = hcl::from_str(s).map_err(|e| ConfigError::parse(origin, e))?;

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    let viewer = ViewerRoot::parse(&parsed.viewer.root).map_err(|source| {
        ConfigError::ViewerRoot {
            path: origin.to_path_buf(),
            source,
        }
    })?;

    if EnvFilter::try_new(&parsed.logging.level).is_err() {
        return Err(ConfigError::LogLevel {
            path: origin.to_path_buf(),
            level: parsed.logging.level,
        });
    }

    Ok(RuntimeConfig {
        viewer,
        capabilities: parsed.capabilities,
        logging: parsed.logging,
    })
}
