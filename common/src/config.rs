//! 設定管理
//!
//! PingerConfig, ServiceConfig等の設定構造体と環境変数ヘルパー

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CommonError, CommonResult};

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `Ok(None)` if neither is set, and `CommonError::Config` if the value
/// does not parse.
pub fn get_env_with_fallback_parse<T>(new_name: &str, old_name: &str) -> CommonResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_with_fallback(new_name, old_name)
        .map(|raw| {
            raw.trim().parse().map_err(|e| {
                CommonError::Config(format!("invalid value '{}' for {}: {}", raw, new_name, e))
            })
        })
        .transpose()
}

/// カンマ区切りのリストを分割（空要素は除外）
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// route-pinger設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingerConfig {
    /// プローブ先のベースURL (デフォルト: "http://localhost:8787")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 除外するパスプレフィックス (デフォルト: ["/noisy-routes"])
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,

    /// プローブ対象とするハンドラーの引数の数 (デフォルト: 1)
    #[serde(default = "default_required_arity")]
    pub required_arity: usize,

    /// 同時実行数。0 または 1 は逐次実行 (デフォルト: 1)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// リクエストタイムアウト（秒）。未設定ならタイムアウトなし
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// 結果行をコンソールに書かない（ライブラリ利用向け、デフォルト: false）
    #[serde(default)]
    pub quiet: bool,
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_excluded_prefixes() -> Vec<String> {
    vec!["/noisy-routes".to_string()]
}

fn default_required_arity() -> usize {
    1
}

fn default_concurrency() -> usize {
    1
}

impl Default for PingerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            excluded_prefixes: default_excluded_prefixes(),
            required_arity: default_required_arity(),
            concurrency: default_concurrency(),
            timeout_secs: None,
            quiet: false,
        }
    }
}

impl PingerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 数値項目が解釈できない場合は `CommonError::Config` を返す。
    pub fn from_env() -> CommonResult<Self> {
        let base_url =
            get_env_with_fallback_or("ROUTE_PINGER_BASE_URL", "PING_BASE_URL", &default_base_url());
        let excluded_prefixes = get_env_with_fallback(
            "ROUTE_PINGER_EXCLUDED_PREFIXES",
            "PING_EXCLUDED_PREFIXES",
        )
        .map(|raw| split_list(&raw))
        .unwrap_or_else(default_excluded_prefixes);
        let concurrency =
            get_env_with_fallback_parse("ROUTE_PINGER_CONCURRENCY", "PING_CONCURRENCY")?
                .unwrap_or_else(default_concurrency);
        let timeout_secs =
            get_env_with_fallback_parse("ROUTE_PINGER_TIMEOUT_SECS", "PING_TIMEOUT_SECS")?;

        Ok(Self {
            base_url,
            excluded_prefixes,
            required_arity: default_required_arity(),
            concurrency,
            timeout_secs,
            quiet: false,
        })
    }

    /// リクエストタイムアウト
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// 設定値を検証
    pub fn validate(&self) -> CommonResult<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(CommonError::Validation("base_url must not be empty".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CommonError::Validation(format!(
                "base_url must start with http:// or https://: {}",
                base
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(CommonError::Validation(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// demo-service設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// ホストアドレス (デフォルト: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8787)
    #[serde(default = "default_port")]
    pub port: u16,

    /// /html/long が叩くアップストリーム (デフォルト: "http://localhost:8788")
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// /fetch/* が叩くプレースホルダーAPI
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_upstream_url() -> String {
    "http://localhost:8788".to_string()
}

fn default_placeholder_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream_url: default_upstream_url(),
            placeholder_url: default_placeholder_url(),
        }
    }
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> CommonResult<Self> {
        Ok(Self {
            host: get_env_with_fallback_or("DEMO_SERVICE_HOST", "SERVICE_HOST", &default_host()),
            port: get_env_with_fallback_parse("DEMO_SERVICE_PORT", "SERVICE_PORT")?
                .unwrap_or_else(default_port),
            upstream_url: get_env_with_fallback_or(
                "DEMO_SERVICE_UPSTREAM_URL",
                "SERVICE_UPSTREAM_URL",
                &default_upstream_url(),
            ),
            placeholder_url: get_env_with_fallback_or(
                "DEMO_SERVICE_PLACEHOLDER_URL",
                "SERVICE_PLACEHOLDER_URL",
                &default_placeholder_url(),
            ),
        })
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_pinger_config_defaults() {
        let config = PingerConfig::default();

        assert_eq!(config.base_url, "http://localhost:8787");
        assert_eq!(config.excluded_prefixes, vec!["/noisy-routes".to_string()]);
        assert_eq!(config.required_arity, 1);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::default();

        assert_eq!(config.bind_addr(), "127.0.0.1:8787");
        assert_eq!(config.upstream_url, "http://localhost:8788");
        assert_eq!(
            config.placeholder_url,
            "https://jsonplaceholder.typicode.com"
        );
    }

    #[test]
    fn test_pinger_config_deserialization() {
        let json = r#"{"base_url":"http://127.0.0.1:9000","timeout_secs":3}"#;
        let config: PingerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
        // デフォルト値が適用される
        assert_eq!(config.excluded_prefixes, vec!["/noisy-routes".to_string()]);
    }

    #[test]
    fn test_pinger_config_validate() {
        assert!(PingerConfig::default().validate().is_ok());

        let config = PingerConfig {
            base_url: "localhost:8787".to_string(),
            ..PingerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CommonError::Validation(_))
        ));

        let config = PingerConfig {
            timeout_secs: Some(0),
            ..PingerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" /noisy-routes, /internal ,,"),
            vec!["/noisy-routes".to_string(), "/internal".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_new_name() {
        std::env::set_var("TEST_NEW_VAR", "new_value");
        std::env::remove_var("TEST_OLD_VAR");

        let result = get_env_with_fallback("TEST_NEW_VAR", "TEST_OLD_VAR");
        assert_eq!(result, Some("new_value".to_string()));

        std::env::remove_var("TEST_NEW_VAR");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_old_name() {
        std::env::remove_var("TEST_NEW_VAR2");
        std::env::set_var("TEST_OLD_VAR2", "old_value");

        let result = get_env_with_fallback("TEST_NEW_VAR2", "TEST_OLD_VAR2");
        assert_eq!(result, Some("old_value".to_string()));

        std::env::remove_var("TEST_OLD_VAR2");
    }

    #[test]
    #[serial]
    fn test_get_env_with_fallback_parse() {
        std::env::remove_var("TEST_NEW_VAR3");
        std::env::remove_var("TEST_OLD_VAR3");
        let unset: Option<usize> =
            get_env_with_fallback_parse("TEST_NEW_VAR3", "TEST_OLD_VAR3").unwrap();
        assert_eq!(unset, None);

        std::env::set_var("TEST_NEW_VAR3", "4");
        let parsed: Option<usize> =
            get_env_with_fallback_parse("TEST_NEW_VAR3", "TEST_OLD_VAR3").unwrap();
        assert_eq!(parsed, Some(4));

        std::env::set_var("TEST_NEW_VAR3", "not-a-number");
        let invalid = get_env_with_fallback_parse::<usize>("TEST_NEW_VAR3", "TEST_OLD_VAR3");
        assert!(matches!(invalid, Err(CommonError::Config(ref msg)) if msg.contains("TEST_NEW_VAR3")));

        std::env::remove_var("TEST_NEW_VAR3");
    }

    #[test]
    #[serial]
    fn test_pinger_config_from_env() {
        std::env::set_var("ROUTE_PINGER_BASE_URL", "http://127.0.0.1:1");
        std::env::set_var("ROUTE_PINGER_EXCLUDED_PREFIXES", "/noisy-routes,/admin");
        std::env::set_var("ROUTE_PINGER_CONCURRENCY", "4");
        std::env::set_var("ROUTE_PINGER_TIMEOUT_SECS", "10");

        let config = PingerConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:1");
        assert_eq!(
            config.excluded_prefixes,
            vec!["/noisy-routes".to_string(), "/admin".to_string()]
        );
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.timeout_secs, Some(10));

        std::env::remove_var("ROUTE_PINGER_BASE_URL");
        std::env::remove_var("ROUTE_PINGER_EXCLUDED_PREFIXES");
        std::env::remove_var("ROUTE_PINGER_CONCURRENCY");
        std::env::remove_var("ROUTE_PINGER_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_pinger_config_from_env_rejects_unparsable_numbers() {
        std::env::set_var("ROUTE_PINGER_TIMEOUT_SECS", "soon");
        assert!(matches!(
            PingerConfig::from_env(),
            Err(CommonError::Config(ref msg)) if msg.contains("ROUTE_PINGER_TIMEOUT_SECS")
        ));
        std::env::remove_var("ROUTE_PINGER_TIMEOUT_SECS");

        std::env::remove_var("ROUTE_PINGER_CONCURRENCY");
        std::env::set_var("PING_CONCURRENCY", "-1");
        assert!(matches!(
            PingerConfig::from_env(),
            Err(CommonError::Config(_))
        ));
        std::env::remove_var("PING_CONCURRENCY");
    }

    #[test]
    #[serial]
    fn test_service_config_from_env_defaults() {
        std::env::remove_var("DEMO_SERVICE_PORT");
        std::env::remove_var("SERVICE_PORT");

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.port, 8787);
    }

    #[test]
    #[serial]
    fn test_service_config_from_env_rejects_invalid_port() {
        std::env::set_var("DEMO_SERVICE_PORT", "99999");
        assert!(matches!(
            ServiceConfig::from_env(),
            Err(CommonError::Config(_))
        ));
        std::env::remove_var("DEMO_SERVICE_PORT");
    }
}
