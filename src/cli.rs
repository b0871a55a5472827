use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::version;

#[derive(Parser)]
#[command(version = version(), about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Replay a scripted touch sequence against a wrapper and print what happens.
    Replay {
        /// Path to a JSON array of timed steps.
        script: PathBuf,
        /// Path to config file (default: built-in defaults).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Width of the content element in pixels.
        #[arg(long, default_value_t = 360)]
        width: i32,
        /// Height of the content element in pixels.
        #[arg(long, default_value_t = 64)]
        height: i32,
        /// Comma-separated widths of the control elements in pixels.
        #[arg(long, value_delimiter = ',', default_value = "90,80")]
        controls: Vec<i32>,
    },
    /// Validate the config file.
    Validate {
        /// Path to config file (default: built-in defaults).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        let command = Cli::command();
        assert_eq!(command.get_version(), Some(version().as_str()));
        command.debug_assert();
    }
}
