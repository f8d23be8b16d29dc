//! 共通型定義
//!
//! RouteDescriptor, HandlerMeta, RouteTable等のルートテーブル型

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CommonResult;

/// ミドルウェア登録時に記録されるHTTPメソッド
pub const METHOD_ALL: &str = "ALL";

/// ミドルウェア登録時に記録されるパス
pub const MIDDLEWARE_PATH: &str = "/*";

/// ハンドラーのメタデータ
///
/// 登録時に宣言する。実行時のシグネチャ検査は行わない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HandlerMeta {
    /// ハンドラー名（ログ表示用）
    pub name: String,
    /// 宣言された仮引数の数
    pub arity: usize,
}

impl HandlerMeta {
    /// 新しいハンドラーメタデータを作成
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    /// コンテキストのみを受け取る通常のルートハンドラー
    pub fn route(name: impl Into<String>) -> Self {
        Self::new(name, 1)
    }

    /// `(context, next)` を受け取るミドルウェア
    pub fn middleware(name: impl Into<String>) -> Self {
        Self::new(name, 2)
    }
}

/// 登録済みルート
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RouteDescriptor {
    /// パス ("/text" など)
    pub path: String,
    /// HTTPメソッド ("GET" など、ミドルウェアは "ALL")
    pub method: String,
    /// ハンドラーメタデータ
    pub handler: HandlerMeta,
}

impl RouteDescriptor {
    /// 新しいルートを作成
    pub fn new(path: impl Into<String>, method: impl Into<String>, handler: HandlerMeta) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            handler,
        }
    }

    /// プレフィックスを付与したルートを返す
    ///
    /// サブアプリケーションの `/` はプレフィックスそのものになる。
    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self {
            path: join_path(prefix, &self.path),
            method: self.method.clone(),
            handler: self.handler.clone(),
        }
    }
}

/// プレフィックスとパスを結合
pub fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match path {
        "" | "/" if prefix.is_empty() => "/".to_string(),
        "" | "/" => prefix.to_string(),
        p if p.starts_with('/') => format!("{}{}", prefix, p),
        p => format!("{}/{}", prefix, p),
    }
}

/// 登録順を保持するルートテーブル
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// 空のルートテーブルを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルートを末尾に追加
    pub fn push(&mut self, route: RouteDescriptor) {
        self.routes.push(route);
    }

    /// 別テーブルのルートをプレフィックス付きで末尾に追加
    pub fn extend_prefixed(&mut self, prefix: &str, other: &RouteTable) {
        self.routes
            .extend(other.routes.iter().map(|r| r.with_prefix(prefix)));
    }

    /// 全ルート（登録順）
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// ルート数
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// JSONファイルから読み込む
    pub fn from_json_file(path: impl AsRef<Path>) -> CommonResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl From<Vec<RouteDescriptor>> for RouteTable {
    fn from(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }
}

impl FromIterator<RouteDescriptor> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteDescriptor>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

/// ルートテーブルを公開するアプリケーション
pub trait RouteSource {
    /// 登録済みルート（登録順）
    fn routes(&self) -> &[RouteDescriptor];
}

impl RouteSource for RouteTable {
    fn routes(&self) -> &[RouteDescriptor] {
        RouteTable::routes(self)
    }
}
