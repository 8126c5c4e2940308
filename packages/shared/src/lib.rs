//! # Imoveis 共有ユーティリティ
//!
//! API レスポンスの JSON 形状とトレーシング初期化など、
//! 複数クレートから使われる共通部品を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` への変換は api クレートの責務）

pub mod api_response;
pub mod health;
pub mod observability;

pub use api_response::{ErrorResponse, ImoveisResponse, MessageResponse};
pub use health::HealthResponse;
