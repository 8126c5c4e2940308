//! # 物件ハンドラ
//!
//! `imoveis` テーブルの CRUD を HTTP に公開する。
//!
//! ## エンドポイント
//!
//! - `GET /imoveis` - 全件取得
//! - `GET /imoveis/{id}` - 個別取得
//! - `GET /imoveis/tipo/{tipo}` - 種別で絞り込み
//! - `POST /imoveis` - 作成（200）
//! - `PUT /imoveis/{id}` - 全フィールド置換（201）
//! - `DELETE /imoveis/delete/{id}` - 削除（200）
//!
//! 更新・削除は対象の存在を確認しない。ステータスコードは既存クライアントとの
//! 互換性のため上記のとおり固定。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use imoveis_domain::imovel::{Imovel, ImovelData, ScalarValue};
use imoveis_infra::repository::ImovelRepository;
use imoveis_shared::{ImoveisResponse, MessageResponse};
use serde::Serialize;

use crate::{
    error::ApiError,
    extract::{ImovelIdPath, JsonBody},
};

#[cfg(test)]
mod tests;

/// 物件 API の共有状態
pub struct ImovelState {
    pub repository: Arc<dyn ImovelRepository>,
}

/// 物件 DTO
///
/// フィールドの宣言順がそのまま JSON のキー順になる。NULL カラムは `null` で返す。
#[derive(Debug, Serialize)]
pub struct ImovelDto {
    pub id:              i64,
    pub logradouro:      ScalarValue,
    pub tipo_logradouro: ScalarValue,
    pub bairro:          ScalarValue,
    pub cidade:          ScalarValue,
    pub cep:             ScalarValue,
    pub tipo:            ScalarValue,
    pub valor:           ScalarValue,
    pub data_aquisicao:  ScalarValue,
}

impl From<Imovel> for ImovelDto {
    fn from(imovel: Imovel) -> Self {
        let (id, data) = imovel.into_parts();
        Self {
            id:              id.as_i64(),
            logradouro:      data.logradouro,
            tipo_logradouro: data.tipo_logradouro,
            bairro:          data.bairro,
            cidade:          data.cidade,
            cep:             data.cep,
            tipo:            data.tipo,
            valor:           data.valor,
            data_aquisicao:  data.data_aquisicao,
        }
    }
}

/// 1 件以上あれば 200、0 件なら [`ApiError::NotFound`]
fn list_response(imoveis: Vec<Imovel>) -> Result<impl IntoResponse, ApiError> {
    if imoveis.is_empty() {
        return Err(ApiError::NotFound);
    }

    let items: Vec<ImovelDto> = imoveis.into_iter().map(ImovelDto::from).collect();
    Ok((StatusCode::OK, Json(ImoveisResponse::new(items))))
}

// --- ハンドラ ---

/// GET /imoveis
pub async fn list_imoveis(
    State(state): State<Arc<ImovelState>>,
) -> Result<impl IntoResponse, ApiError> {
    let imoveis = state.repository.find_all().await?;
    list_response(imoveis)
}

/// GET /imoveis/{id}
///
/// 該当があれば 1 要素の配列で返す。
pub async fn get_imovel(
    State(state): State<Arc<ImovelState>>,
    ImovelIdPath(id): ImovelIdPath,
) -> Result<impl IntoResponse, ApiError> {
    let imovel = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((
        StatusCode::OK,
        Json(ImoveisResponse::single(ImovelDto::from(imovel))),
    ))
}

/// GET /imoveis/tipo/{tipo}
pub async fn list_imoveis_by_tipo(
    State(state): State<Arc<ImovelState>>,
    Path(tipo): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let imoveis = state.repository.find_by_tipo(&tipo).await?;
    list_response(imoveis)
}

/// POST /imoveis
///
/// 採番された ID はログにのみ出力し、レスポンスには含めない。
pub async fn create_imovel(
    State(state): State<Arc<ImovelState>>,
    JsonBody(data): JsonBody<ImovelData>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.repository.insert(&data).await?;
    tracing::info!(%id, "物件を作成しました");

    Ok((StatusCode::OK, Json(MessageResponse::created())))
}

/// PUT /imoveis/{id}
pub async fn update_imovel(
    State(state): State<Arc<ImovelState>>,
    ImovelIdPath(id): ImovelIdPath,
    JsonBody(data): JsonBody<ImovelData>,
) -> Result<impl IntoResponse, ApiError> {
    state.repository.update(id, &data).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::updated())))
}

/// DELETE /imoveis/delete/{id}
pub async fn delete_imovel(
    State(state): State<Arc<ImovelState>>,
    ImovelIdPath(id): ImovelIdPath,
) -> Result<impl IntoResponse, ApiError> {
    state.repository.delete(id).await?;

    Ok((StatusCode::OK, Json(MessageResponse::deleted())))
}

/// ルーターのフォールバック
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
