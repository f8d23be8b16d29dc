//! Demo Service
//!
//! ルートテーブルを公開するデモ用Webサービス

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// ルート登録とルートテーブル記録
pub mod registry;

/// エラー型定義
pub mod error;

/// axumサーバー起動
pub mod server;

/// CLIインターフェース
pub mod cli;

use route_pinger_common::config::ServiceConfig;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サービス設定
    pub config: ServiceConfig,
    /// 共有HTTPクライアント（接続プーリング有効）
    pub http_client: reqwest::Client,
}

impl AppState {
    /// 新しいアプリケーション状態を作成
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_clones_share_config() {
        let config = ServiceConfig {
            upstream_url: "http://127.0.0.1:9999".to_string(),
            ..ServiceConfig::default()
        };
        let state = AppState::new(config.clone());
        let cloned = state.clone();

        assert_eq!(state.config, config);
        assert_eq!(cloned.config.upstream_url, "http://127.0.0.1:9999");
        assert_eq!(cloned.config, state.config);
    }
}
