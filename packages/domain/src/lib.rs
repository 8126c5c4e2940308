//! # Imoveis ドメイン層
//!
//! 不動産物件（imovel）を表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このサービスは HTTP と SQL の薄い変換層であり、ビジネスルールを持たない。
//! ドメイン層は以下のみを提供する:
//!
//! - **エンティティ**: 物件 [`Imovel`](imovel::Imovel)
//! - **値オブジェクト**: 物件 ID [`ImovelId`](imovel::ImovelId)、
//!   型の緩いカラム値 [`ScalarValue`](imovel::ScalarValue)
//!
//! フィールドの妥当性検証はストレージエンジンの責務とし、この層では行わない。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘            ↗
//!      shared
//! ```
//!
//! ドメイン層はインフラ層（DB）に一切依存しない。

pub mod imovel;

pub use imovel::{Imovel, ImovelData, ImovelId, ScalarValue};
