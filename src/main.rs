#[macro_use]
extern crate tracing;

use std::env;
use std::path::Path;

use anyhow::anyhow;
use clap::Parser;
use slidewrap::cli::{Cli, Sub};
use slidewrap::replay::{load_script, Replay};
use slidewrap::utils::version;
use slidewrap::wrapper::Size;
use slidewrap_config::Config;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "slidewrap=debug,info";

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let _client = tracy_client::Client::start();

    info!("starting version {}", version());

    match cli.subcommand {
        Sub::Replay {
            script,
            config,
            width,
            height,
            controls,
        } => {
            let config = load_config(config.as_deref())?;
            let steps = load_script(&script)?;

            let mut replay = Replay::new(&config, Size::new(width, height), &controls);
            for record in replay.run(&steps) {
                println!("{record}");
            }

            let wrapper = replay.wrapper();
            println!(
                "final: open={} offset={} scrollable={}",
                wrapper.is_open(),
                wrapper.current_offset(),
                wrapper.scrollable().unwrap_or(0),
            );
        }
        Sub::Validate { config } => {
            load_config(config.as_deref())?;
            info!("config is valid");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        debug!("using the built-in default config");
        return Ok(Config::default());
    };

    // miette reports render through Debug.
    Config::load(path).map_err(|err| anyhow!("{err:?}"))
}
