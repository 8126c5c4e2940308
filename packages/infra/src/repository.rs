//! # リポジトリ実装
//!
//! ## 設計方針
//!
//! - **1 メソッド 1 ステートメント**: 各メソッドはパラメータ化された SQL を 1 文だけ実行する
//! - **データベース抽象化**: sqlx を使用し、MySQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod imovel_repository;

pub use imovel_repository::{ImovelRepository, MySqlImovelRepository};
