//! # Imoveis API サーバー
//!
//! 不動産物件（imovel）の CRUD を提供する HTTP API。
//!
//! ```text
//! ┌──────────┐  JSON   ┌──────────────┐  1 接続/リクエスト  ┌─────────┐
//! │  Client  │────────▶│ imoveis-api  │────────────────────▶│  MySQL  │
//! └──────────┘         │ (port 5000)  │                     └─────────┘
//!                      └──────────────┘
//! ```
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーター構築
//! - [`config`] - サーバー設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`extract`] - エラー形式をそろえたカスタムエクストラクタ
//! - [`handler`] - HTTP リクエストハンドラ

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;

/// ログの `service` フィールドに出すサービス名
pub const SERVICE_NAME: &str = "imoveis-api";
