use anyhow::Result;
use beingx_core::{config::ConfigLoader, Being};
use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[clap(
    name = "being-x",
    author,
    version = "0.1.0",
    about = "A conversational being with long-term memory"
)]
struct Cli {
    #[clap(
        long,
        short,
        default_value = "brain.yml",
        help = "Path to the YAML configuration file"
    )]
    config: PathBuf,

    #[clap(long, short, default_value = "info")]
    log_level: String,

    #[clap(long, help = "Directory for stm.json and ltm.json (overrides memory.data_dir)")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let mut config = ConfigLoader::from_file(&cli.config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", cli.config.display(), e))?;
    log::info!("Config loaded from {}", cli.config.display());

    if let Some(data_dir) = cli.data_dir {
        config.memory.data_dir = data_dir;
    }

    let being = Being::from_config(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start: {}", e))?;

    log::info!("being-x is online");
    run_repl(being).await;
    log::info!("Shutting down gracefully");
    Ok(())
}

async fn run_repl(mut being: Being) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();

        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                return;
            }
        };

        let input = match line {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to read stdin: {}", e);
                return;
            }
        };

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            return;
        }

        let output = tokio::select! {
            output = being.handle_input(trimmed) => output,
            _ = tokio::signal::ctrl_c() => {
                println!();
                return;
            }
        };

        if let Some(output) = output {
            println!("\n{}\n", output);
        }
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
