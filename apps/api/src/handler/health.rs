//! # ヘルスチェックハンドラ
//!
//! プロセスの稼働確認用。データベースには接続しない。

use axum::Json;
use imoveis_shared::HealthResponse;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
