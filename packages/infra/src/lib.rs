//! # Imoveis インフラ層
//!
//! MySQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: リクエストごとの MySQL コネクション取得と解放
//! - **リポジトリ実装**: `imoveis` テーブルに対する CRUD
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続設定とコネクション管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと MySQL 実装
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use imoveis_infra::{db::DbConfig, repository::{ImovelRepository, MySqlImovelRepository}};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(DbConfig::from_env()?);
//!     let repository = MySqlImovelRepository::new(config);
//!
//!     let imoveis = repository.find_all().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{DbConfig, DbConfigError};
pub use error::{InfraError, InfraErrorKind};
