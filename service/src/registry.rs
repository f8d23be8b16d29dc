//! ルート登録
//!
//! axumへのルート登録と同時に、登録順のルートテーブルを記録する。
//! ハンドラーの引数の数は登録時に `HandlerMeta` で宣言する。

use axum::handler::Handler;
use axum::routing::{get, MethodRouter};
use axum::Router;
use route_pinger_common::types::{
    HandlerMeta, RouteDescriptor, RouteSource, RouteTable, METHOD_ALL, MIDDLEWARE_PATH,
};

type DeferredLayer<S> = Box<dyn FnOnce(Router<S>) -> Router<S> + Send>;

/// 登録済みアプリケーション
///
/// axumルーターと、そこに登録したルートのテーブルを対で保持する。
pub struct App<S = ()> {
    /// axumルーター
    pub router: Router<S>,
    /// 登録済みルート（登録順）
    pub routes: RouteTable,
}

impl<S> App<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// 状態を注入して提供可能なアプリケーションにする
    pub fn with_state(self, state: S) -> App<()> {
        App {
            router: self.router.with_state(state),
            routes: self.routes,
        }
    }
}

impl<S> RouteSource for App<S> {
    fn routes(&self) -> &[RouteDescriptor] {
        self.routes.routes()
    }
}

/// ルートテーブルを記録しながらルーターを組み立てるビルダー
pub struct RouteTableBuilder<S = ()> {
    router: Router<S>,
    table: RouteTable,
    middleware: Vec<DeferredLayer<S>>,
}

impl<S> Default for RouteTableBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteTableBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// 空のビルダーを作成
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            table: RouteTable::new(),
            middleware: Vec::new(),
        }
    }

    /// GETルートを登録
    pub fn get<H, T>(self, path: &str, meta: HandlerMeta, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.route_with("GET", path, meta, get(handler))
    }

    /// 任意のメソッドルーターを登録
    ///
    /// `method` はルートテーブルに記録されるメソッド名。
    /// 同じパスを二度登録するとaxumがパニックする。
    pub fn route_with(
        mut self,
        method: &str,
        path: &str,
        meta: HandlerMeta,
        method_router: MethodRouter<S>,
    ) -> Self {
        self.router = self.router.route(path, method_router);
        self.table
            .push(RouteDescriptor::new(path, method.to_ascii_uppercase(), meta));
        self
    }

    /// 全ルートに掛かるミドルウェアを登録
    ///
    /// テーブルには `ALL /*` として記録する。レイヤーは `build()` 時に適用されるため、
    /// 後から登録したルートにも掛かる。
    pub fn middleware<F>(mut self, name: &str, apply: F) -> Self
    where
        F: FnOnce(Router<S>) -> Router<S> + Send + 'static,
    {
        self.table.push(RouteDescriptor::new(
            MIDDLEWARE_PATH,
            METHOD_ALL,
            HandlerMeta::middleware(name),
        ));
        self.middleware.push(Box::new(apply));
        self
    }

    /// サブアプリケーションをプレフィックス配下にマウント
    pub fn nest(mut self, prefix: &str, sub: RouteTableBuilder<S>) -> Self {
        let sub = sub.build();
        self.router = self.router.nest(prefix, sub.router);
        self.table.extend_prefixed(prefix, &sub.routes);
        self
    }

    /// 登録済みルートのテーブル
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// ミドルウェアを適用してアプリケーションを完成させる
    pub fn build(self) -> App<S> {
        let router = self
            .middleware
            .into_iter()
            .fold(self.router, |router, apply| apply(router));

        App {
            router,
            routes: self.table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn hello() -> &'static str {
        "hello"
    }

    fn paths(table: &RouteTable) -> Vec<String> {
        table.routes().iter().map(|r| r.path.clone()).collect()
    }

    #[test]
    fn test_records_routes_in_registration_order() {
        let builder = RouteTableBuilder::<()>::new()
            .get("/b", HandlerMeta::route("b"), hello)
            .get("/a", HandlerMeta::route("a"), hello);

        assert_eq!(paths(builder.table()), vec!["/b", "/a"]);
        assert!(builder.table().routes().iter().all(|r| r.method == "GET"));
    }

    #[test]
    fn test_middleware_is_recorded_with_arity_two() {
        let app = RouteTableBuilder::<()>::new()
            .middleware("noop", |router| router)
            .get("/text", HandlerMeta::route("text"), hello)
            .build();

        let first = &app.routes.routes()[0];
        assert_eq!(first.path, "/*");
        assert_eq!(first.method, "ALL");
        assert_eq!(first.handler.arity, 2);
        assert_eq!(app.routes.len(), 2);
    }

    #[test]
    fn test_nest_prefixes_sub_routes() {
        let sub = RouteTableBuilder::<()>::new()
            .get("/1", HandlerMeta::route("one"), hello)
            .get("/2", HandlerMeta::route("two"), hello);

        let app = RouteTableBuilder::<()>::new()
            .nest("/noisy-routes", sub)
            .get("/text", HandlerMeta::route("text"), hello)
            .build();

        assert_eq!(
            paths(&app.routes),
            vec!["/noisy-routes/1", "/noisy-routes/2", "/text"]
        );
    }

    #[test]
    fn test_route_with_uppercases_method() {
        let table = RouteTableBuilder::<()>::new()
            .route_with(
                "post",
                "/submit",
                HandlerMeta::route("submit"),
                axum::routing::post(hello),
            )
            .build()
            .routes;

        assert_eq!(table.routes()[0].method, "POST");
    }

    #[tokio::test]
    async fn test_nested_route_is_served() {
        let sub = RouteTableBuilder::<()>::new().get("/1", HandlerMeta::route("one"), hello);
        let app = RouteTableBuilder::<()>::new()
            .nest("/noisy-routes", sub)
            .build();

        let response = app
            .router
            .oneshot(
                Request::builder()
                    .uri("/noisy-routes/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
    }
}
