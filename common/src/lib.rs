//! Route Pinger Common Library
//!
//! demo-service と route-pinger で共有する型定義・設定・エラー

#![warn(missing_docs)]

/// 共通型定義（ルートテーブル）
pub mod types;

/// 設定管理（設定構造体・環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// ロギング初期化ユーティリティ
pub mod logging;
