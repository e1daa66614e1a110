pub mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use bzalpha_configuration::ClientConfiguration;
use clap::Command;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::Generator;
use clap_complete::Shell;
use clap_complete::generate;
use colored::Colorize;
use commands::Commands;
use logging::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "imperium", author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long = "generate", value_enum)]
    generator: Option<Shell>,
    /// Client configuration file, defaults to ./configuration/client.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides TRACING_LEVEL for this invocation
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Main function of the imperium command line tool
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        return;
    }

    if let Err(error) = run(cli).await {
        let error = format!("{error:?}");
        eprintln!("{}", error.red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let configuration = ClientConfiguration::read_config(cli.config.as_deref())
        .context("Could not load the client configuration")?;

    let (log_handles, _guard) = logging::setup_logging(&configuration.log_dir)?;
    if let Some(level) = cli.log_level {
        log_handles.set_level(level)?;
    }

    commands::handle_command(command, &configuration).await
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut std::io::stdout(),
    );
}
