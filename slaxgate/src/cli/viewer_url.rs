use slaxgate_core::conf::RuntimeConfig;
use slaxgate_core::launch::launch_viewer_urls;
use tracing::warn;

pub fn wrap(cfg: &RuntimeConfig, url: &str) -> anyhow::Result<()> {
    println!("{}", cfg.viewer.to_viewer_url(url));
    Ok(())
}

pub fn unwrap(cfg: &RuntimeConfig, viewer_url: &str) -> anyhow::Result<()> {
    match cfg.viewer.extract_original_url(viewer_url) {
        Some(original) => println!("{original}"),
        None => warn!(viewer_url, "not a viewer URL for this root"),
    }
    Ok(())
}

pub fn launch(cfg: &RuntimeConfig, action: &str, entries: &[String]) -> anyhow::Result<()> {
    for url in launch_viewer_urls(&cfg.viewer, action, entries) {
        println!("{url}");
    }
    Ok(())
}
