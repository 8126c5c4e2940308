//! # HTTP リクエストハンドラ
//!
//! 各ハンドラはサブモジュールに配置し、ここで re-export する。
//!
//! ```text
//! handler.rs
//! └── handler/
//!     ├── health.rs   # ヘルスチェック
//!     └── imovel.rs   # 物件 CRUD
//! ```

pub mod health;
pub mod imovel;

pub use health::health_check;
pub use imovel::{
    ImovelDto,
    ImovelState,
    create_imovel,
    delete_imovel,
    get_imovel,
    list_imoveis,
    list_imoveis_by_tipo,
    route_not_found,
    update_imovel,
};
