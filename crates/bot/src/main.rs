use anyhow::Context;

use workact_bot::{build_controller, run, BotConfig, ConsoleTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    workact_observability::init();

    let config = BotConfig::from_env().context("failed to load configuration")?;
    let controller = build_controller(&config)?;

    tracing::info!(operator = %config.console_operator, "console session started; type /start");

    let mut transport = ConsoleTransport::new(config.console_operator);
    run(&controller, &mut transport).await.context("console transport failed")?;
    Ok(())
}
