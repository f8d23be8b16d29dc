//! Route Pinger
//!
//! アプリケーションのルートテーブルからプローブ対象を抽出し、
//! 稼働中のサーバーへ1件ずつHTTPリクエストを送るヘルスチェックツール

#![warn(missing_docs)]

/// ルートハーベスター
pub mod harvest;

/// ルートプローバー
pub mod probe;

/// エラー型定義
pub mod error;

/// CLIインターフェース
pub mod cli;

use route_pinger_common::config::PingerConfig;
use route_pinger_common::types::RouteSource;
use tracing::info;

pub use error::{PingerError, PingerResult};
pub use harvest::{harvest, PingableRoute, RouteFilter};
pub use probe::{ProbeMode, ProbeOutcome, ProbeResult, ProbeSummary, Prober};

/// ルートテーブルをハーベストし、設定に従ってプローブする
///
/// 個々のプローブの失敗では `Err` にならない。
/// `Err` になるのは設定やHTTPクライアントの初期化に失敗した場合のみ。
pub async fn run_probe<A: RouteSource + ?Sized>(
    app: &A,
    config: &PingerConfig,
) -> PingerResult<Vec<ProbeResult>> {
    let prober = Prober::from_config(config)?;
    let filter = RouteFilter::from_config(config);

    let all_routes = app.routes();
    let routes = filter.harvest(all_routes);
    info!(
        total = all_routes.len(),
        pingable = routes.len(),
        "Harvested route table"
    );

    Ok(prober
        .run(&routes, ProbeMode::from_concurrency(config.concurrency))
        .await)
}
