//! # MySQL データベース接続管理
//!
//! リクエストごとに 1 本のコネクションを開き、処理後に閉じる。
//!
//! ## 設計方針
//!
//! - **接続プールなし**: 各リポジトリ呼び出しが自分のコネクションを取得する
//! - **不変設定**: [`DbConfig`] は起動時に環境変数から一度だけ構築し、
//!   `Arc` で共有する。実行時に書き換えられるグローバル状態は持たない
//! - **スコープ付き解放**: 正常終了時は [`release`] で明示的に閉じ、
//!   `?` による早期リターン時はドロップでソケットが閉じられる。
//!   どの経路でもコネクションがリクエストより長生きすることはない
//!
//! ## 環境変数
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `DB_HOST` | `localhost` | ホスト名 |
//! | `DB_USER` | なし | ユーザー名 |
//! | `DB_PASSWORD` | なし | パスワード |
//! | `DB_NAME` | `db_escola` | データベース名 |
//! | `DB_PORT` | `3306` | ポート番号 |
//! | `SSL_CA_PATH` | なし | 設定時は CA 証明書で TLS 検証を行う |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use imoveis_infra::db::{self, DbConfig};
//!
//! async fn example() -> Result<(), imoveis_infra::InfraError> {
//!     let config = DbConfig::from_env()?;
//!     let mut conn = db::connect(&config).await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM imoveis")
//!         .fetch_one(&mut conn)
//!         .await?;
//!
//!     db::release(conn).await;
//!     Ok(())
//! }
//! ```

use std::{env, num::ParseIntError, path::PathBuf};

use sqlx::{
    Connection,
    MySqlConnection,
    mysql::{MySqlConnectOptions, MySqlSslMode},
};
use thiserror::Error;

use crate::error::InfraError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_DATABASE: &str = "db_escola";
const DEFAULT_PORT: u16 = 3306;

/// データベース設定の読み込みエラー
#[derive(Debug, Error)]
pub enum DbConfigError {
    #[error("DB_PORT は有効なポート番号である必要があります: {value:?}")]
    InvalidPort {
        value:  String,
        #[source]
        source: ParseIntError,
    },
}

/// データベース接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host:        String,
    pub user:        Option<String>,
    pub password:    Option<String>,
    pub database:    String,
    pub port:        u16,
    /// CA 証明書のパス（設定時は TLS 必須）
    pub ssl_ca_path: Option<PathBuf>,
}

impl DbConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// テストでプロセス環境変数を書き換えずに済むよう、参照元を差し替え可能にしている。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbConfigError> {
        let port = match lookup("DB_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| DbConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            user: lookup("DB_USER"),
            password: lookup("DB_PASSWORD"),
            database: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            port,
            ssl_ca_path: lookup("SSL_CA_PATH").map(PathBuf::from),
        })
    }

    /// sqlx の接続オプションに変換する
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database);

        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(ca) = &self.ssl_ca_path {
            options = options.ssl_mode(MySqlSslMode::VerifyCa).ssl_ca(ca);
        }

        options
    }
}

/// MySQL コネクションを 1 本開く
///
/// 失敗時はエラーをログに出力し、[`InfraErrorKind::Connection`] を返す。
/// リトライは行わない。
///
/// [`InfraErrorKind::Connection`]: crate::error::InfraErrorKind::Connection
pub async fn connect(config: &DbConfig) -> Result<MySqlConnection, InfraError> {
    match MySqlConnection::connect_with(&config.connect_options()).await {
        Ok(conn) => Ok(conn),
        Err(e) => {
            tracing::error!(
                error = %e,
                host = %config.host,
                port = config.port,
                database = %config.database,
                "データベース接続に失敗しました"
            );
            Err(InfraError::connection(e))
        }
    }
}

/// コネクションを閉じる
///
/// 正常に閉じられなかった場合も警告ログのみとし、呼び出し元の結果には影響させない。
pub async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "コネクションのクローズに失敗しました");
    }
}
