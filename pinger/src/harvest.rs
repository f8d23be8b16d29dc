//! ルートハーベスター
//!
//! ルートテーブル全体からプローブ対象のルートだけを抽出する。
//!
//! 対象条件（両方を満たすこと）:
//! 1. ハンドラーの宣言引数数が `required_arity`（デフォルト1）と一致する
//! 2. パスが除外プレフィックス（デフォルト `/noisy-routes`）で始まらない

use route_pinger_common::config::PingerConfig;
use route_pinger_common::types::RouteDescriptor;
use std::ops::Deref;

/// デフォルトの除外プレフィックス
pub const DEFAULT_EXCLUDED_PREFIX: &str = "/noisy-routes";

/// フィルタを通過したルート
///
/// 元のルートテーブルを借用するだけで、追加のフィールドは持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingableRoute<'a>(&'a RouteDescriptor);

impl<'a> PingableRoute<'a> {
    /// 元のルート
    pub fn descriptor(&self) -> &'a RouteDescriptor {
        self.0
    }
}

impl Deref for PingableRoute<'_> {
    type Target = RouteDescriptor;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

/// ハーベスト条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFilter {
    required_arity: usize,
    excluded_prefixes: Vec<String>,
}

impl Default for RouteFilter {
    fn default() -> Self {
        Self::new(1, [DEFAULT_EXCLUDED_PREFIX])
    }
}

impl RouteFilter {
    /// 新しいフィルタを作成
    ///
    /// 空文字列のプレフィックスは全ルートに一致してしまうため無視する。
    pub fn new<I, P>(required_arity: usize, excluded_prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            required_arity,
            excluded_prefixes: excluded_prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// 設定からフィルタを作成
    pub fn from_config(config: &PingerConfig) -> Self {
        Self::new(config.required_arity, config.excluded_prefixes.iter().cloned())
    }

    /// 除外プレフィックス
    pub fn excluded_prefixes(&self) -> &[String] {
        &self.excluded_prefixes
    }

    /// パスが除外対象か
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// ルートがプローブ対象か
    pub fn is_pingable(&self, route: &RouteDescriptor) -> bool {
        route.handler.arity == self.required_arity && !self.is_excluded(&route.path)
    }

    /// プローブ対象のルートを元の順序のまま抽出
    pub fn harvest<'a>(&self, routes: &'a [RouteDescriptor]) -> Vec<PingableRoute<'a>> {
        routes
            .iter()
            .filter(|route| self.is_pingable(route))
            .map(PingableRoute)
            .collect()
    }
}

/// デフォルト条件でハーベスト
pub fn harvest(routes: &[RouteDescriptor]) -> Vec<PingableRoute<'_>> {
    RouteFilter::default().harvest(routes)
}
