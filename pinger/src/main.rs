//! Route Pinger Entry Point

use clap::Parser;
use route_pinger::cli::Cli;
use route_pinger::RouteFilter;
use route_pinger_common::config::PingerConfig;
use route_pinger_common::logging;
use route_pinger_common::types::RouteTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init("ROUTE_PINGER_LOG_LEVEL")?;

    let config = cli.apply(PingerConfig::from_env()?);
    config.validate()?;

    let table = match &cli.routes_file {
        Some(path) => RouteTable::from_json_file(path)?,
        None => demo_service::api::route_table(),
    };

    if cli.list {
        let filter = RouteFilter::from_config(&config);
        for route in filter.harvest(table.routes()) {
            println!("{} {}", route.method, route.path);
        }
        return Ok(());
    }

    route_pinger::run_probe(&table, &config).await?;
    Ok(())
}
