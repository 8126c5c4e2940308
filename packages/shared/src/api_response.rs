//! # API レスポンスボディ
//!
//! 物件 API が返す 3 種類の JSON 形状を定義する。
//!
//! | 型 | 形状 | 用途 |
//! |----|------|------|
//! | [`ImoveisResponse`] | `{"imoveis": [...]}` | 一覧・個別取得 |
//! | [`MessageResponse`] | `{"mensagem": "..."}` | 作成・更新・削除の完了通知 |
//! | [`ErrorResponse`] | `{"erro": "..."}` | すべてのエラー |
//!
//! キー名とメッセージ文言は既存クライアントとの互換性のため固定であり、変更しないこと。

use serde::{Deserialize, Serialize};

/// 物件リストのレスポンス
///
/// 個別取得でも 1 要素の配列で返す（一覧と同じ形状にそろえるため）。
///
/// ```
/// use imoveis_shared::ImoveisResponse;
///
/// let response = ImoveisResponse::new(vec![1, 2]);
/// assert_eq!(response.imoveis, vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImoveisResponse<T> {
    pub imoveis: Vec<T>,
}

impl<T> ImoveisResponse<T> {
    pub fn new(imoveis: Vec<T>) -> Self {
        Self { imoveis }
    }

    /// 1 件だけを含むレスポンスを作成する
    pub fn single(imovel: T) -> Self {
        Self {
            imoveis: vec![imovel],
        }
    }
}

/// 処理完了メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensagem: String,
}

impl MessageResponse {
    pub fn new(mensagem: impl Into<String>) -> Self {
        Self {
            mensagem: mensagem.into(),
        }
    }

    pub fn created() -> Self {
        Self::new("imovel criado com sucesso")
    }

    pub fn updated() -> Self {
        Self::new("imovel atualizado com sucesso")
    }

    pub fn deleted() -> Self {
        Self::new("imovel deletado com sucesso")
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub erro: String,
}

impl ErrorResponse {
    pub fn new(erro: impl Into<String>) -> Self {
        Self { erro: erro.into() }
    }

    /// DB 接続失敗（500）
    pub fn connection_failed() -> Self {
        Self::new("Erro ao conectar ao banco de dados")
    }

    /// 読み取り系エンドポイントで該当行なし（404）
    pub fn no_imovel_found() -> Self {
        Self::new("Nenhum imovel encontrado")
    }

    /// ルート不一致（404）
    pub fn route_not_found() -> Self {
        Self::new("Recurso nao encontrado")
    }

    /// リクエストボディ不正（400）
    pub fn invalid_request(detail: impl AsRef<str>) -> Self {
        Self::new(format!("Requisicao invalida: {}", detail.as_ref()))
    }

    /// SQL 実行失敗など内部エラー（500）
    pub fn internal() -> Self {
        Self::new("Erro interno do servidor")
    }
}
