use std::sync::Arc;

use crate::{conf::Settings, pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};
use standard_error::{Interpolate, StandardError};

mod migrate;

#[derive(Parser)]
#[command(about = "job and role listings with signed edit links")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Migrate,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    let Some(command) = args.command else {
        tracing::error!("no subcommand passed");
        return Ok(());
    };
    let settings = Arc::new(
        Settings::new()
            .map_err(|e| StandardError::new("ERR-CONF-000").interpolate_err(e.to_string()))?,
    );
    match command {
        SubCommandType::Listen => {
            listen(settings).await?;
        }
        SubCommandType::Migrate => {
            migrate::apply(&settings).await?;
        }
    }
    Ok(())
}
