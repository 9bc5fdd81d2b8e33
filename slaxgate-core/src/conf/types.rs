use crate::capability::CapabilityFlags;
use crate::logging::LogFormat;
use crate::viewer::ViewerRoot;
use serde::Deserialize;

/// `slaxgate.hcl` as written by the operator.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub viewer: ViewerSpec,

    #[serde(default)]
    pub capabilities: CapabilityFlags,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ViewerSpec {
    /// Absolute URL of the viewer entry page.
    pub root: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Validated configuration handed to the interceptor and reconciler.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub viewer: ViewerRoot,
    pub capabilities: CapabilityFlags,
    pub logging: LoggingConfig,
}
