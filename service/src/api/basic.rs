//! シンプルなレスポンス系エンドポイント

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

use super::error::AppError;
use crate::error::ServiceError;
use crate::AppState;

/// /text と /json が返す挨拶
pub const GREETING: &str = "Hello Axum!";

/// /html/long がアップストリームへ送るリクエスト数
pub const HTML_LONG_FETCH_COUNT: usize = 15;

/// GET /text
pub async fn text() -> &'static str {
    GREETING
}

/// GET /json
pub async fn json() -> Json<Value> {
    Json(json!({ "message": GREETING }))
}

/// GET /html/long
///
/// アップストリームへ複数リクエストを同時に送り、最後のレスポンス本文をHTMLとして返す。
pub async fn html_long(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let url = state.config.upstream_url.as_str();
    let requests = (0..HTML_LONG_FETCH_COUNT).map(|_| state.http_client.get(url).send());
    let mut responses = futures::future::join_all(requests).await;

    let Some(last) = responses.pop() else {
        return Ok(Html("<p>Hi</p>".to_string()));
    };

    let response = last.map_err(|e| ServiceError::Upstream(e.to_string()))?;
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    Ok(Html(body))
}
