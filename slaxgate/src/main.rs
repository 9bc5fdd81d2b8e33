mod cli;

use clap::{Parser, Subcommand};
use slaxgate_core::conf::LoggingConfig;
use slaxgate_core::logging::{default_log_format, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "slaxgate",
    version,
    about = "Slaxgate: slax resource interception diagnostics"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a config file
    Check {
        #[arg(long, default_value = "config/slaxgate.hcl")]
        config: PathBuf,

        /// Print errors without hints
        #[arg(long)]
        plain: bool,
    },

    /// Replay one host event through the interceptor and print the decision
    Decide {
        #[arg(long, default_value = "config/slaxgate.hcl")]
        config: PathBuf,

        /// Requested URL
        url: String,

        #[arg(long, default_value = "GET")]
        method: String,

        /// Response header as `Name: value`; repeatable
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Treat the load as a child frame
        #[arg(long)]
        nested: bool,

        #[arg(long, value_enum, default_value_t = cli::decide::Stage::Headers)]
        stage: cli::decide::Stage,
    },

    /// Print the viewer URL for a resource URL
    Wrap {
        #[arg(long, default_value = "config/slaxgate.hcl")]
        config: PathBuf,

        url: String,
    },

    /// Recover the resource URL from a viewer URL
    Unwrap {
        #[arg(long, default_value = "config/slaxgate.hcl")]
        config: PathBuf,

        viewer_url: String,
    },

    /// Replay a file-browser action and print the viewer URLs to open
    Launch {
        #[arg(long, default_value = "config/slaxgate.hcl")]
        config: PathBuf,

        #[arg(long, default_value = slaxgate_core::launch::RUN_AS_SLAX_ACTION)]
        action: String,

        entries: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check { config, plain } => {
            init_logging(&LoggingConfig {
                format: default_log_format(),
                ..LoggingConfig::default()
            });
            cli::check::check(config, plain)
        }
        Command::Decide {
            config,
            url,
            method,
            headers,
            nested,
            stage,
        } => {
            let cfg = cli::load(&config)?;
            init_logging(&cfg.logging);
            cli::decide::decide(cfg, &url, &method, &headers, nested, stage)
        }
        Command::Wrap { config, url } => {
            let cfg = cli::load(&config)?;
            init_logging(&cfg.logging);
            cli::viewer_url::wrap(&cfg, &url)
        }
        Command::Unwrap { config, viewer_url } => {
            let cfg = cli::load(&config)?;
            init_logging(&cfg.logging);
            cli::viewer_url::unwrap(&cfg, &viewer_url)
        }
        Command::Launch {
            config,
            action,
            entries,
        } => {
            let cfg = cli::load(&config)?;
            init_logging(&cfg.logging);
            cli::viewer_url::launch(&cfg, &action, &entries)
        }
    }
}
