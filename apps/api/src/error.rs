//! # API エラー定義
//!
//! ハンドラが返すエラーと、`{"erro": "..."}` 形式の HTTP レスポンスへの変換を定義する。
//!
//! ## マッピング
//!
//! | ApiError | HTTP Status | erro |
//! |----------|-------------|------|
//! | Connection | 500 | `Erro ao conectar ao banco de dados` |
//! | NotFound | 404 | `Nenhum imovel encontrado` |
//! | RouteNotFound | 404 | `Recurso nao encontrado` |
//! | InvalidBody | 400 | `Requisicao invalida: <詳細>` |
//! | Database | 500 | `Erro interno do servidor` |
//!
//! 500 系の詳細はサーバーログにのみ出力し、クライアントには返さない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use imoveis_infra::InfraError;
use imoveis_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// データベースに接続できなかった
    #[error("データベース接続エラー: {0}")]
    Connection(#[source] InfraError),

    /// 読み取り系エンドポイントで該当行なし
    #[error("物件が見つかりません")]
    NotFound,

    /// ルート不一致、または ID が整数でない
    #[error("ルートが見つかりません")]
    RouteNotFound,

    /// リクエストボディが JSON でない、またはフィールドが欠けている・型が違う
    #[error("不正なリクエストボディ: {0}")]
    InvalidBody(String),

    /// SQL 実行・行デコードの失敗
    #[error("データベースエラー: {0}")]
    Database(#[source] InfraError),
}

impl From<InfraError> for ApiError {
    fn from(e: InfraError) -> Self {
        if e.is_connection() {
            Self::Connection(e)
        } else {
            Self::Database(e)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Connection(e) => {
                tracing::error!(error = %e, "データベースに接続できませんでした");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::connection_failed(),
                )
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::no_imovel_found()),
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, ErrorResponse::route_not_found()),
            ApiError::InvalidBody(detail) => {
                tracing::debug!(%detail, "リクエストボディを拒否しました");
                (StatusCode::BAD_REQUEST, ErrorResponse::invalid_request(detail))
            }
            ApiError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラーが発生しました"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal())
            }
        };

        (status, Json(body)).into_response()
    }
}
