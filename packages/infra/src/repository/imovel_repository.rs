//! # ImovelRepository
//!
//! `imoveis` テーブルに対する CRUD を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **コネクションはメソッド単位**: 各メソッドの先頭で [`db::connect`] し、
//!   末尾で [`db::release`] する。エラーによる早期リターン時はドロップで閉じる
//! - **名前ベースのカラムアクセス**: SELECT では必ずカラムを明示列挙し、
//!   `Row::try_get("カラム名")` で取り出す。スキーマ側でカラム順が変わっても壊れない
//! - **型に寛容なデコード**: 各カラムは NULL・整数・小数・日付・文字列のいずれでも受け付け、
//!   NULL は JSON の `null` になる。`valor` は `CAST(valor AS DOUBLE)` で取得し、
//!   DECIMAL でも浮動小数でも扱える
//! - **存在確認なし**: UPDATE / DELETE は影響行数を検査しない

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use imoveis_domain::imovel::{Imovel, ImovelData, ImovelId, ScalarValue};
use sqlx::{
    MySql,
    Row,
    ValueRef,
    mysql::{MySqlArguments, MySqlRow},
    query::Query,
};

use crate::{
    db::{self, DbConfig},
    error::InfraError,
};

const SELECT_ALL: &str = r#"
    SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo,
           CAST(valor AS DOUBLE) AS valor, data_aquisicao
    FROM imoveis
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo,
           CAST(valor AS DOUBLE) AS valor, data_aquisicao
    FROM imoveis
    WHERE id = ?
"#;

const SELECT_BY_TIPO: &str = r#"
    SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo,
           CAST(valor AS DOUBLE) AS valor, data_aquisicao
    FROM imoveis
    WHERE tipo = ?
"#;

const INSERT: &str = r#"
    INSERT INTO imoveis
        (logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

const UPDATE: &str = r#"
    UPDATE imoveis
    SET logradouro = ?, tipo_logradouro = ?, bairro = ?, cidade = ?,
        cep = ?, tipo = ?, valor = ?, data_aquisicao = ?
    WHERE id = ?
"#;

const DELETE: &str = r#"
    DELETE FROM imoveis
    WHERE id = ?
"#;

/// 物件リポジトリトレイト
#[async_trait]
pub trait ImovelRepository: Send + Sync {
    /// 全件をストレージの返却順で取得する
    async fn find_all(&self) -> Result<Vec<Imovel>, InfraError>;

    /// ID で物件を検索する
    async fn find_by_id(&self, id: ImovelId) -> Result<Option<Imovel>, InfraError>;

    /// 種別（`tipo`）が一致する物件をストレージの返却順で取得する
    async fn find_by_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, InfraError>;

    /// 物件を作成し、ストレージが採番した ID を返す
    async fn insert(&self, data: &ImovelData) -> Result<ImovelId, InfraError>;

    /// 物件の全フィールドを置き換える
    ///
    /// 該当行が存在しなくてもエラーにしない。
    async fn update(&self, id: ImovelId, data: &ImovelData) -> Result<(), InfraError>;

    /// 物件を削除する
    ///
    /// 該当行が存在しなくてもエラーにしない。
    async fn delete(&self, id: ImovelId) -> Result<(), InfraError>;
}

/// MySQL 実装の ImovelRepository
#[derive(Debug, Clone)]
pub struct MySqlImovelRepository {
    config: Arc<DbConfig>,
}

impl MySqlImovelRepository {
    pub fn new(config: Arc<DbConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ImovelRepository for MySqlImovelRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Imovel>, InfraError> {
        let mut conn = db::connect(&self.config).await?;
        let rows = sqlx::query(SELECT_ALL).fetch_all(&mut conn).await?;
        db::release(conn).await;

        rows.iter().map(imovel_from_row).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: ImovelId) -> Result<Option<Imovel>, InfraError> {
        let mut conn = db::connect(&self.config).await?;
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&mut conn)
            .await?;
        db::release(conn).await;

        row.as_ref().map(imovel_from_row).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%tipo))]
    async fn find_by_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, InfraError> {
        let mut conn = db::connect(&self.config).await?;
        let rows = sqlx::query(SELECT_BY_TIPO)
            .bind(tipo)
            .fetch_all(&mut conn)
            .await?;
        db::release(conn).await;

        rows.iter().map(imovel_from_row).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, data: &ImovelData) -> Result<ImovelId, InfraError> {
        let mut conn = db::connect(&self.config).await?;
        let result = bind_data(sqlx::query(INSERT), data)
            .execute(&mut conn)
            .await?;
        db::release(conn).await;

        let id = result.last_insert_id();
        i64::try_from(id)
            .map(ImovelId::from_i64)
            .map_err(|_| InfraError::unexpected(format!("採番された id が i64 の範囲外です: {id}")))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: ImovelId, data: &ImovelData) -> Result<(), InfraError> {
        let mut conn = db::connect(&self.config).await?;
        let result = bind_data(sqlx::query(UPDATE), data)
            .bind(id.as_i64())
            .execute(&mut conn)
            .await?;
        db::release(conn).await;

        tracing::debug!(rows_affected = result.rows_affected(), "物件を更新しました");
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: ImovelId) -> Result<(), InfraError> {
        let mut conn = db::connect(&self.config).await?;
        let result = sqlx::query(DELETE)
            .bind(id.as_i64())
            .execute(&mut conn)
            .await?;
        db::release(conn).await;

        tracing::debug!(rows_affected = result.rows_affected(), "物件を削除しました");
        Ok(())
    }
}

// =============================================================================
// バインド
// =============================================================================

type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// 8 フィールドをカラム順にバインドする
fn bind_data<'q>(query: MySqlQuery<'q>, data: &'q ImovelData) -> MySqlQuery<'q> {
    [
        &data.logradouro,
        &data.tipo_logradouro,
        &data.bairro,
        &data.cidade,
        &data.cep,
        &data.tipo,
        &data.valor,
        &data.data_aquisicao,
    ]
    .into_iter()
    .fold(query, bind_scalar)
}

fn bind_scalar<'q>(query: MySqlQuery<'q>, value: &'q ScalarValue) -> MySqlQuery<'q> {
    match value {
        ScalarValue::Null => query.bind(None::<&str>),
        ScalarValue::Bool(v) => query.bind(*v),
        ScalarValue::Integer(v) => query.bind(*v),
        ScalarValue::Decimal(v) => query.bind(*v),
        ScalarValue::Text(v) => query.bind(v.as_str()),
    }
}

// =============================================================================
// デコード
// =============================================================================

fn imovel_from_row(row: &MySqlRow) -> Result<Imovel, InfraError> {
    let data = ImovelData {
        logradouro:      decode_scalar(row, "logradouro")?,
        tipo_logradouro: decode_scalar(row, "tipo_logradouro")?,
        bairro:          decode_scalar(row, "bairro")?,
        cidade:          decode_scalar(row, "cidade")?,
        cep:             decode_scalar(row, "cep")?,
        tipo:            decode_scalar(row, "tipo")?,
        valor:           decode_scalar(row, "valor")?,
        data_aquisicao:  decode_scalar(row, "data_aquisicao")?,
    };

    Ok(Imovel::new(ImovelId::from_i64(decode_integer(row, "id")?), data))
}

/// 符号付き・符号なしどちらの整数カラムも i64 として取り出す
fn decode_integer(row: &MySqlRow, column: &str) -> Result<i64, InfraError> {
    if let Ok(v) = row.try_get::<i64, _>(column) {
        return Ok(v);
    }

    let v: u64 = row.try_get(column)?;
    i64::try_from(v)
        .map_err(|_| InfraError::unexpected(format!("{column} が i64 の範囲外です: {v}")))
}

/// カラムの型に応じて取り出す
///
/// NULL → `Null`、整数 → `Integer`、浮動小数 → `Decimal`、
/// DATE → `YYYY-MM-DD` の `Text`、文字列 → `Text` の順に判定する。
fn decode_scalar(row: &MySqlRow, column: &str) -> Result<ScalarValue, InfraError> {
    if row.try_get_raw(column)?.is_null() {
        return Ok(ScalarValue::Null);
    }
    if let Ok(v) = decode_integer(row, column) {
        return Ok(ScalarValue::Integer(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(column) {
        return Ok(ScalarValue::Decimal(v));
    }
    if let Ok(date) = row.try_get::<NaiveDate, _>(column) {
        return Ok(ScalarValue::Text(date.format("%Y-%m-%d").to_string()));
    }

    Ok(ScalarValue::Text(row.try_get(column)?))
}
