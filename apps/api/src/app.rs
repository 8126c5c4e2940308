//! # ルーター構築
//!
//! バイナリと統合テストの両方から同じルーティングを使えるよう、
//! `Router` の組み立てをここに集約する。

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::{
    SERVICE_NAME,
    handler::{
        ImovelState,
        create_imovel,
        delete_imovel,
        get_imovel,
        health_check,
        list_imoveis,
        list_imoveis_by_tipo,
        route_not_found,
        update_imovel,
    },
};

/// アプリケーション全体のルーターを構築する
///
/// どのルートにも一致しないパスは `{"erro": "Recurso nao encontrado"}` の 404 になる。
pub fn build_router(state: Arc<ImovelState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/imoveis", get(list_imoveis).post(create_imovel))
        .route("/imoveis/{id}", get(get_imovel).put(update_imovel))
        .route("/imoveis/tipo/{tipo}", get(list_imoveis_by_tipo))
        .route("/imoveis/delete/{id}", delete(delete_imovel))
        .fallback(route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// `service` フィールド付きのリクエスト span
fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        service = SERVICE_NAME,
        method = %request.method(),
        uri = %request.uri(),
    )
}
