//! ルートプローバー
//!
//! ハーベストしたルートに1件ずつHTTPリクエストを送り、結果を報告する。
//! ステータスコードの良し悪しは判定しない。送信自体の失敗もルート単位で吸収し、
//! 残りのルートのプローブを止めない。

use futures::stream::{self, StreamExt};
use reqwest::{Client, Method, Url};
use route_pinger_common::config::PingerConfig;
use std::error::Error as _;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{PingerError, PingerResult};
use crate::harvest::PingableRoute;

/// プローブの実行方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMode {
    /// 1件ずつ完了を待ってから次へ進む
    #[default]
    Sequential,
    /// 指定数まで同時にリクエストする（報告順は入力順のまま）
    Concurrent(usize),
}

impl ProbeMode {
    /// 同時実行数から実行方式を決める（0と1は逐次）
    pub fn from_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            Self::Sequential
        } else {
            Self::Concurrent(concurrency)
        }
    }
}

/// 1ルート分のプローブ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// レスポンスを受信した（ステータスコードは問わない）
    Responded(u16),
    /// 送信に失敗した（接続拒否、DNS、タイムアウト、TLS等）
    Failed(String),
}

/// プローブ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// ルートのパス
    pub path: String,
    /// 使用したHTTPメソッド
    pub method: String,
    /// 結果
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// レスポンスを受信したか
    pub fn responded(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Responded(_))
    }

    /// 受信したステータスコード
    pub fn status(&self) -> Option<u16> {
        match self.outcome {
            ProbeOutcome::Responded(status) => Some(status),
            ProbeOutcome::Failed(_) => None,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Responded(status) => write!(f, "Response from {}: {}", self.path, status),
            ProbeOutcome::Failed(error) => write!(f, "Error pinging {}: {}", self.path, error),
        }
    }
}

/// プローブ実行の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeSummary {
    /// プローブしたルート数
    pub total: usize,
    /// レスポンスを受信した数
    pub responded: usize,
    /// 送信に失敗した数
    pub failed: usize,
}

impl ProbeSummary {
    /// 結果一覧から集計
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let responded = results.iter().filter(|r| r.responded()).count();
        Self {
            total: results.len(),
            responded,
            failed: results.len() - responded,
        }
    }
}

/// エラーと原因の連鎖を1行にまとめる
fn describe_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// ルートプローバー
#[derive(Clone)]
pub struct Prober {
    client: Client,
    base_url: String,
    console: bool,
}

impl Prober {
    /// タイムアウトなしのプローバーを作成
    pub fn new(base_url: &str) -> PingerResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// タイムアウトを指定してプローバーを作成
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> PingerResult<Self> {
        Url::parse(base_url)
            .map_err(|e| PingerError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            console: true,
        })
    }

    /// 設定からプローバーを作成
    pub fn from_config(config: &PingerConfig) -> PingerResult<Self> {
        config.validate()?;
        let prober = Self::with_timeout(&config.base_url, config.timeout())?;
        Ok(if config.quiet { prober.quiet() } else { prober })
    }

    /// 結果行をコンソールに書かないプローバーにする（tracingイベントは出す）
    pub fn quiet(mut self) -> Self {
        self.console = false;
        self
    }

    /// 結果行をコンソールに書くか
    pub fn reports_to_console(&self) -> bool {
        self.console
    }

    /// ベースURL（末尾の `/` は除去済み）
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// プローブ先URL
    ///
    /// パスはエンコードもパラメータ置換もせずそのまま連結する。
    pub fn target_url(&self, route: &PingableRoute<'_>) -> String {
        format!("{}{}", self.base_url, route.path)
    }

    /// 結果を1行出力する
    ///
    /// レスポンスは標準出力、送信失敗は標準エラーに書く。
    fn report(&self, result: &ProbeResult) {
        match &result.outcome {
            ProbeOutcome::Responded(status) => {
                debug!(path = %result.path, method = %result.method, status = *status, "Probe responded");
                if self.console {
                    println!("{}", result);
                }
            }
            ProbeOutcome::Failed(error) => {
                warn!(path = %result.path, method = %result.method, error = %error, "Probe failed");
                if self.console {
                    eprintln!("{}", result);
                }
            }
        }
    }

    /// 1ルートをプローブする（出力なし）
    pub async fn probe(&self, route: &PingableRoute<'_>) -> ProbeResult {
        let url = self.target_url(route);

        let outcome = match Method::from_bytes(route.method.as_bytes()) {
            Ok(method) => match self.client.request(method, &url).send().await {
                Ok(response) => ProbeOutcome::Responded(response.status().as_u16()),
                Err(e) => ProbeOutcome::Failed(describe_error(&e)),
            },
            Err(e) => ProbeOutcome::Failed(format!("invalid HTTP method '{}': {}", route.method, e)),
        };

        ProbeResult {
            path: route.path.clone(),
            method: route.method.clone(),
            outcome,
        }
    }

    /// 1ルートをプローブして結果を出力する
    pub async fn probe_one(&self, route: &PingableRoute<'_>) -> ProbeResult {
        let result = self.probe(route).await;
        self.report(&result);
        result
    }

    /// 全ルートを逐次プローブする
    ///
    /// 前のルートの結果が出るまで次のルートには進まない。
    pub async fn probe_all(&self, routes: &[PingableRoute<'_>]) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(routes.len());
        for route in routes {
            results.push(self.probe_one(route).await);
        }
        results
    }

    /// 全ルートを同時実行数の上限付きでプローブする
    ///
    /// 結果の出力と戻り値の順序は入力順を保つ。
    pub async fn probe_all_concurrent(
        &self,
        routes: &[PingableRoute<'_>],
        limit: usize,
    ) -> Vec<ProbeResult> {
        let mut results = Vec::with_capacity(routes.len());
        let mut pending = stream::iter(routes.iter().map(|route| self.probe(route)))
            .buffered(limit.max(1));

        while let Some(result) = pending.next().await {
            self.report(&result);
            results.push(result);
        }
        results
    }

    /// 実行方式に従ってプローブし、集計をログに出す
    pub async fn run(&self, routes: &[PingableRoute<'_>], mode: ProbeMode) -> Vec<ProbeResult> {
        info!(
            count = routes.len(),
            base_url = %self.base_url,
            mode = ?mode,
            "Starting route probe"
        );

        let results = match mode {
            ProbeMode::Sequential => self.probe_all(routes).await,
            ProbeMode::Concurrent(limit) => self.probe_all_concurrent(routes, limit).await,
        };

        let summary = ProbeSummary::from_results(&results);
        info!(
            total = summary.total,
            responded = summary.responded,
            failed = summary.failed,
            "Route probe completed"
        );

        results
    }
}
