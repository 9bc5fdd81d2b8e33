use slaxgate_core::conf::{ConfigError, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            let caps = cfg.capabilities;
            println!("✔ Config loaded successfully");
            println!("✔ viewer root {}", cfg.viewer.as_str());
            println!("✔ declarative redirect: {}", caps.declarative_redirect);
            println!("✔ ftp interception: {}", caps.ftp_interception);
            println!("✔ file interception: {}", caps.file_interception);
            Ok(())
        }
        Err(err) => {
            print_config_error(&err, plain);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError, plain: bool) {
    eprintln!("{err}");
    if plain {
        return;
    }
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ViewerRoot { .. } => Some(
            "The viewer root must be an absolute URL without query or fragment.\n\
             \n\
             Example:\n\
             \n\
             viewer {\n\
               root = \"chrome-extension://<id>/launcher/launcher.html\"\n\
             }",
        ),

        ConfigError::LogLevel { .. } => Some(
            "Log levels use RUST_LOG syntax, e.g. `info` or `slaxgate_core=debug`.",
        ),

        ConfigError::ReadFile { .. } | ConfigError::Parse { .. } => None,
    }
}
