//! CLI module for demo-service

use clap::Parser;
use route_pinger_common::config::ServiceConfig;

/// Demo service - Web application exposing its registered route table
#[derive(Parser, Debug)]
#[command(name = "demo-service")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DEMO_SERVICE_HOST              Bind address (default: 127.0.0.1)
    DEMO_SERVICE_PORT              Listen port (default: 8787)
    DEMO_SERVICE_UPSTREAM_URL      Upstream for /html/long (default: http://localhost:8788)
    DEMO_SERVICE_PLACEHOLDER_URL   Placeholder API for /fetch/* (default: https://jsonplaceholder.typicode.com)
    DEMO_SERVICE_LOG_LEVEL         Log level (default: info)
"#)]
pub struct Cli {
    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Print the registered route table as JSON and exit
    #[arg(long, default_value_t = false)]
    pub print_routes: bool,
}

impl Cli {
    /// 環境変数由来の設定にCLI引数を上書きする
    pub fn apply(&self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}
