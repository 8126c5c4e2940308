//! # API サーバー設定
//!
//! 環境変数から HTTP サーバーのバインド先を読み込む。
//! データベース接続設定は [`imoveis_infra::DbConfig`] が担当する。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | No | `5000` | ポート番号 |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use imoveis_api::config::ApiConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = ApiConfig::from_env()?;
//!
//! println!("サーバー: {}", config.bind_address());
//! ```

use std::{env, num::ParseIntError};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// サーバー設定の読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_PORT は有効なポート番号である必要があります: {value:?}")]
    InvalidPort {
        value:  String,
        #[source]
        source: ParseIntError,
    },
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
    pub host: String,
    /// ポート番号
    pub port: u16,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("API_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_lookup_未設定なら0_0_0_0の5000番で待ち受ける() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();

        assert_eq!(
            config,
            ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            }
        );
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_from_lookup_環境変数の値を使う() {
        let config = ApiConfig::from_lookup(|key| match key {
            "API_HOST" => Some("127.0.0.1".to_string()),
            "API_PORT" => Some("8080".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_from_lookup_不正なポートはエラーになる() {
        let result = ApiConfig::from_lookup(|key| (key == "API_PORT").then(|| "70000".to_string()));

        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
    }
}
