//! # Imoveis API サーバー
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p imoveis-api
//! ```
//!
//! ## 環境変数
//!
//! サーバー設定は [`ApiConfig`]、DB 接続設定は [`DbConfig`] を参照。
//! `LOG_FORMAT=json` で JSON ログ、`RUST_LOG` でログレベルを指定できる。

use std::sync::Arc;

use imoveis_api::{
    SERVICE_NAME,
    app::build_router,
    config::ApiConfig,
    handler::ImovelState,
};
use imoveis_infra::{DbConfig, repository::MySqlImovelRepository};
use imoveis_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env()?);
    let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

    let api_config = ApiConfig::from_env()?;
    let db_config = Arc::new(DbConfig::from_env()?);

    tracing::info!(
        "Imoveis API サーバーを起動します: {} (db: {}:{}/{})",
        api_config.bind_address(),
        db_config.host,
        db_config.port,
        db_config.database
    );

    // 接続は起動時には確立せず、リクエストごとに開く
    let state = Arc::new(ImovelState {
        repository: Arc::new(MySqlImovelRepository::new(db_config)),
    });
    let app = build_router(state);

    let listener = TcpListener::bind(api_config.bind_address()).await?;
    tracing::info!("Imoveis API サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
