//! REST APIハンドラー
//!
//! ルートは `RouteTableBuilder` 経由で登録し、ルートテーブルとして公開する。

pub mod basic;
pub mod error;
pub mod fetch;
pub mod noisy;

use route_pinger_common::config::ServiceConfig;
use route_pinger_common::types::{HandlerMeta, RouteTable};
use tower_http::trace::TraceLayer;

use crate::registry::{App, RouteTableBuilder};
use crate::AppState;

/// ノイジールートのマウント先
pub const NOISY_ROUTES_PREFIX: &str = "/noisy-routes";

/// アプリケーションを組み立てる
pub fn create_app(state: AppState) -> App {
    RouteTableBuilder::<AppState>::new()
        .middleware("trace", |router| router.layer(TraceLayer::new_for_http()))
        .nest(NOISY_ROUTES_PREFIX, noisy::routes())
        .get("/text", HandlerMeta::route("text"), basic::text)
        .get("/json", HandlerMeta::route("json"), basic::json)
        .get("/html/long", HandlerMeta::route("html_long"), basic::html_long)
        .get(
            "/fetch/sequential",
            HandlerMeta::route("fetch_sequential"),
            fetch::sequential,
        )
        .get(
            "/fetch/sequential/broken",
            HandlerMeta::route("fetch_sequential_broken"),
            fetch::sequential_broken,
        )
        .get(
            "/fetch/parallel",
            HandlerMeta::route("fetch_parallel"),
            fetch::parallel,
        )
        .build()
        .with_state(state)
}

/// デフォルト設定で組み立てたアプリケーションのルートテーブル
pub fn route_table() -> RouteTable {
    create_app(AppState::new(ServiceConfig::default())).routes
}
