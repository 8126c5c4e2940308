//! # 物件（Imovel）
//!
//! `imoveis` テーブルの 1 行に対応するエンティティと値オブジェクト。
//!
//! ## カラム順序
//!
//! ワイヤ上のフィールド順序はテーブルのカラム順序と一致させる:
//!
//! ```text
//! id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao
//! ```
//!
//! ## 型の緩いフィールド
//!
//! ID 以外の 8 フィールドは検証せずにストレージへ渡す。クライアントは
//! 数値を文字列で送ることもあり（例: `"valor": "300000"`）、`null` を送ることもある。
//! すべて [`ScalarValue`] で受け、受け取った JSON の種別のまま保存・返却する。
//! キーの欠落だけはリクエスト不正として扱う。
//!
//! ## 使用例
//!
//! ```rust
//! use imoveis_domain::imovel::{Imovel, ImovelData, ImovelId, ScalarValue};
//!
//! let data = ImovelData {
//!     logradouro:      "Ronaldo".into(),
//!     tipo_logradouro: "Rua".into(),
//!     bairro:          "Moema".into(),
//!     cidade:          "Sao Paulo".into(),
//!     cep:             ScalarValue::Integer(12345),
//!     tipo:            "apartamento".into(),
//!     valor:           ScalarValue::Decimal(10000.42),
//!     data_aquisicao:  "2014-11-23".into(),
//! };
//! let imovel = Imovel::new(ImovelId::from_i64(1), data);
//!
//! assert_eq!(imovel.id().as_i64(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 物件の一意識別子
///
/// ストレージ（AUTO_INCREMENT）が採番する。一度割り当てられた ID は変更されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImovelId(i64);

/// パスセグメントを物件 ID として解釈できなかった
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImovelIdError {
    /// 数字以外の文字を含む、または空
    #[error("物件 ID は数字のみで構成される必要があります: {0:?}")]
    NotDigits(String),

    /// i64 の範囲を超える
    #[error("物件 ID が範囲外です: {0}")]
    OutOfRange(String),
}

impl ImovelId {
    /// DB から取得した値から物件 ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// URL パスセグメントから物件 ID を解釈する
    ///
    /// ASCII 数字 1 文字以上のみを受け付ける。符号（`+`/`-`）、空白、
    /// 小数点を含むセグメントはルートに一致しないものとして扱う。
    pub fn parse_path(segment: &str) -> Result<Self, ImovelIdError> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ImovelIdError::NotDigits(segment.to_string()));
        }

        segment
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ImovelIdError::OutOfRange(segment.to_string()))
    }
}

impl fmt::Display for ImovelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 型の緩いカラム値
///
/// JSON の null・真偽値・整数・小数・文字列のいずれかを、受け取った種別のまま保持する。
/// デシリアライズは宣言順に試行される。配列とオブジェクトは受け付けない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl ScalarValue {
    /// 文字列値であればその内容を返す
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// 物件の属性（ID 以外の 8 フィールド）
///
/// 作成・更新リクエストのボディであり、INSERT / UPDATE のバインド値でもある。
/// フィールドの宣言順はテーブルのカラム順序と一致させること。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImovelData {
    pub logradouro:      ScalarValue,
    pub tipo_logradouro: ScalarValue,
    pub bairro:          ScalarValue,
    pub cidade:          ScalarValue,
    pub cep:             ScalarValue,
    pub tipo:            ScalarValue,
    pub valor:           ScalarValue,
    pub data_aquisicao:  ScalarValue,
}

/// 物件エンティティ
#[derive(Debug, Clone, PartialEq)]
pub struct Imovel {
    id:   ImovelId,
    data: ImovelData,
}

impl Imovel {
    pub fn new(id: ImovelId, data: ImovelData) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> ImovelId {
        self.id
    }

    pub fn data(&self) -> &ImovelData {
        &self.data
    }

    pub fn tipo(&self) -> &ScalarValue {
        &self.data.tipo
    }

    /// ID と属性に分解する
    pub fn into_parts(self) -> (ImovelId, ImovelData) {
        (self.id, self.data)
    }
}
