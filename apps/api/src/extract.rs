//! # カスタムエクストラクタ
//!
//! axum 標準エクストラクタの拒否レスポンスを `{"erro": "..."}` 形式にそろえる。
//!
//! - [`ImovelIdPath`]: パスの `{id}` を数字のみの物件 ID として取り出す。
//!   数字以外はルート不一致（404）として扱う
//! - [`JsonBody`]: JSON ボディを取り出す。失敗は 400 にする

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use imoveis_domain::imovel::ImovelId;

use crate::error::ApiError;

/// パスパラメータの物件 ID
#[derive(Debug, Clone, Copy)]
pub struct ImovelIdPath(pub ImovelId);

impl<S> FromRequestParts<S> for ImovelIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::RouteNotFound)?;

        ImovelId::parse_path(&segment).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "物件 ID として解釈できないパスです");
            ApiError::RouteNotFound
        })
    }
}

/// JSON リクエストボディ
///
/// Content-Type 不一致・構文エラー・フィールド欠落・型不一致はすべて
/// [`ApiError::InvalidBody`] になる。
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

        Ok(Self(value))
    }
}
