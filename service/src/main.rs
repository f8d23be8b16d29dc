//! Demo Service Entry Point

use clap::Parser;
use demo_service::cli::Cli;
use demo_service::{api, server, AppState};
use route_pinger_common::config::ServiceConfig;
use route_pinger_common::logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init("DEMO_SERVICE_LOG_LEVEL")?;

    let config = cli.apply(ServiceConfig::from_env()?);
    let app = api::create_app(AppState::new(config.clone()));

    if cli.print_routes {
        println!("{}", serde_json::to_string_pretty(&app.routes)?);
        return Ok(());
    }

    info!("Demo service v{}", env!("CARGO_PKG_VERSION"));
    info!(routes = app.routes.len(), "Route table registered");

    server::run(app.router, &config.bind_addr()).await?;
    Ok(())
}
