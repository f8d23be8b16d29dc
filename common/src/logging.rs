//! ロギング初期化ユーティリティ

use crate::error::{CommonError, CommonResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// 指定した環境変数からログレベルを読み取る
///
/// 未設定の場合は `RUST_LOG`、それも無ければ `info` を使う。
pub fn log_level_from_env(env_var: &str) -> String {
    std::env::var(env_var)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// tracingサブスクライバーを初期化する
///
/// 出力は標準エラー。標準出力はプローブ結果のレポートに使う。
/// 既にグローバルサブスクライバーが設定済みの場合はそのまま続行する。
pub fn init(env_var: &str) -> CommonResult<()> {
    let level = log_level_from_env(env_var);
    let filter = EnvFilter::try_new(&level)
        .map_err(|e| CommonError::Logging(format!("invalid log level '{}': {}", level, e)))?;

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized");
    }

    Ok(())
}
