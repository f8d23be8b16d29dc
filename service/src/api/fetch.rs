//! 外部APIフェッチ系エンドポイント
//!
//! 逐次実行・並列実行・意図的に壊れた処理の比較用

use axum::extract::State;
use axum::Json;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::error::AppError;
use crate::error::{ServiceError, ServiceResult};
use crate::AppState;

fn placeholder_url(state: &AppState, resource: &str) -> String {
    format!(
        "{}/{}",
        state.config.placeholder_url.trim_end_matches('/'),
        resource
    )
}

async fn fetch_json(client: &Client, url: &str) -> ServiceResult<Value> {
    debug!(url = %url, "Fetching upstream JSON");

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;

    response
        .json::<Value>()
        .await
        .map_err(|e| ServiceError::Parse(e.to_string()))
}

/// GET /fetch/sequential
///
/// users を取得してから posts を取得する。
pub async fn sequential(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let users = fetch_json(&state.http_client, &placeholder_url(&state, "users")).await?;
    let posts = fetch_json(&state.http_client, &placeholder_url(&state, "posts")).await?;

    Ok(Json(json!({
        "placeholderUsers": users,
        "placeholderPosts": posts,
    })))
}

/// GET /fetch/sequential/broken
///
/// 取得済みのJSONを文字列として再パースしようとして必ず失敗する。
pub async fn sequential_broken(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let posts = fetch_json(&state.http_client, &placeholder_url(&state, "posts")).await?;
    let users = fetch_json(&state.http_client, &placeholder_url(&state, "users")).await?;

    let raw: String =
        serde_json::from_value(users).map_err(|e| ServiceError::Parse(e.to_string()))?;
    let users: Value =
        serde_json::from_str(&raw).map_err(|e| ServiceError::Parse(e.to_string()))?;

    Ok(Json(json!({
        "placeholderUsers": users,
        "placeholderPosts": posts,
    })))
}

/// GET /fetch/parallel
///
/// users と posts を同時に取得する。
pub async fn parallel(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let users_url = placeholder_url(&state, "users");
    let posts_url = placeholder_url(&state, "posts");

    let (users, posts) = tokio::try_join!(
        fetch_json(&state.http_client, &users_url),
        fetch_json(&state.http_client, &posts_url),
    )?;

    Ok(Json(json!({
        "placeholderUsers": users,
        "placeholderPosts": posts,
    })))
}
