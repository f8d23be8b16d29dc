//! ノイジールート
//!
//! ルートテーブルを水増しするための番号付きルート群

use route_pinger_common::types::HandlerMeta;

use crate::registry::RouteTableBuilder;

/// 登録するルート数
pub const NOISY_ROUTE_COUNT: usize = 25;

/// `/1` .. `/25` を登録したサブアプリケーション
pub fn routes<S>() -> RouteTableBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    (1..=NOISY_ROUTE_COUNT).fold(RouteTableBuilder::new(), |builder, i| {
        builder.get(
            &format!("/{}", i),
            HandlerMeta::route(format!("noisy_route_{}", i)),
            move || async move { format!("This is route {}", i) },
        )
    })
}
