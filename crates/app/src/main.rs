#![forbid(unsafe_code)]

mod cli;
mod commands;
mod shell;
mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use services::{AppServices, ChatCompletionsClient, Clock};
use tracing::{info, warn};

use crate::cli::{Cli, normalize_sqlite_url, prepare_sqlite_file};
use crate::shell::Shell;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log.as_deref());

    if let Err(err) = run(cli).await {
        eprintln!("skyhigh: {err}");
        std::process::exit(2);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = normalize_sqlite_url(&cli.db_url);
    prepare_sqlite_file(&db_url)?;

    let settings = match cli.generator_draft().validate() {
        Ok(settings) => Some(settings),
        Err(err) => {
            warn!(error = %err, "generative model settings rejected");
            None
        }
    };
    let model = ChatCompletionsClient::new(settings);
    if !model.enabled() {
        warn!("generative model disabled; quizzes and the mentor will report an error");
    }
    let model = Arc::new(model);

    let services = AppServices::new_sqlite(
        &db_url,
        &cli.sop,
        model,
        Clock::system(),
        Duration::from_millis(cli.advance_delay_ms),
    )
    .await?;
    info!(db = %db_url, sop = %cli.sop.display(), "services ready");

    let mut shell = Shell::new(services);
    shell
        .run(tokio::io::BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
