//! CLI module for route-pinger

use clap::Parser;
use route_pinger_common::config::PingerConfig;
use std::path::PathBuf;

/// Route pinger - Probe every simple route of a running web application
#[derive(Parser, Debug)]
#[command(name = "route-pinger")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    ROUTE_PINGER_BASE_URL           Base URL to probe (default: http://localhost:8787)
    ROUTE_PINGER_EXCLUDED_PREFIXES  Comma separated path prefixes to skip (default: /noisy-routes)
    ROUTE_PINGER_CONCURRENCY        Concurrent probes, 0 or 1 = sequential (default: 1)
    ROUTE_PINGER_TIMEOUT_SECS       Per-request timeout in seconds (default: none)
    ROUTE_PINGER_LOG_LEVEL          Log level (default: info)
"#)]
pub struct Cli {
    /// Base URL of the running application
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Path prefix to exclude (repeatable, replaces the configured list)
    #[arg(short, long = "exclude", value_name = "PREFIX")]
    pub exclude: Vec<String>,

    /// Number of concurrent probes (0 or 1 = sequential)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// JSON route table to probe instead of the built-in demo service
    #[arg(short, long, value_name = "PATH")]
    pub routes_file: Option<PathBuf>,

    /// Print the harvested routes without probing
    #[arg(short, long, default_value_t = false)]
    pub list: bool,
}

impl Cli {
    /// 環境変数由来の設定にCLI引数を上書きする
    pub fn apply(&self, mut config: PingerConfig) -> PingerConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if !self.exclude.is_empty() {
            config.excluded_prefixes = self.exclude.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = Some(timeout_secs);
        }
        config
    }
}
