pub mod check;
pub mod decide;
pub mod viewer_url;

use anyhow::Context;
use slaxgate_core::conf::{RuntimeConfig, load_config};
use std::path::Path;

pub fn load(path: &Path) -> anyhow::Result<RuntimeConfig> {
    load_config(path).with_context(|| format!("failed to load {}", path.display()))
}
