//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Connection, Database, Unexpected）
//!
//! API 層は [`InfraError::is_connection`] で接続失敗とそれ以外を区別し、
//! 異なるエラーメッセージを返す。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From<sqlx::Error>` や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベース接続エラー
    ///
    /// ホスト到達不能、認証失敗、TLS ハンドシェイク失敗など、
    /// コネクション確立の段階で発生したもの。
    #[error("データベース接続エラー: {0}")]
    Connection(#[source] sqlx::Error),

    /// データベースエラー
    ///
    /// 接続確立後の SQL 実行失敗、行のデコード失敗など。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 接続確立に失敗したエラーかどうか
    pub fn is_connection(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Connection(_))
    }

    // ===== Convenience constructors =====

    /// 接続エラーを生成する
    ///
    /// `From<sqlx::Error>` は `Database` に変換されるため、
    /// 接続段階のエラーは明示的にこのコンストラクタを使う。
    pub fn connection(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Connection(source),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_sqlx_errorはdatabaseになりspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_repo");
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::RowNotFound.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            assert!(!err.is_connection());
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_repo"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_connectionは接続エラーとして判定される() {
        let err = InfraError::connection(sqlx::Error::PoolTimedOut);

        assert!(err.is_connection());
        assert!(err.source().is_some());
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::unexpected("id が範囲外です");
        assert_eq!(format!("{err}"), "予期しないエラー: id が範囲外です");
    }
}
