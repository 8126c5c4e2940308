//! # テスト用モックリポジトリ
//!
//! ハンドラテスト・API 統合テストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! imoveis-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use imoveis_domain::imovel::{Imovel, ImovelData, ImovelId};

use crate::{error::InfraError, repository::ImovelRepository};

#[derive(Debug, Default)]
struct State {
    imoveis:     Vec<Imovel>,
    last_id:     i64,
    unreachable: bool,
}

/// インメモリの ImovelRepository
///
/// ID は AUTO_INCREMENT と同様に単調増加で採番し、削除後も再利用しない。
#[derive(Debug, Clone, Default)]
pub struct MockImovelRepository {
    state: Arc<Mutex<State>>,
}

impl MockImovelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存データを持った状態で作成する
    pub fn with_imoveis(imoveis: Vec<Imovel>) -> Self {
        let repo = Self::new();
        for imovel in imoveis {
            repo.add(imovel);
        }
        repo
    }

    /// すべての操作が接続エラーを返すリポジトリを作成する
    pub fn unreachable() -> Self {
        let repo = Self::new();
        repo.state.lock().unwrap().unreachable = true;
        repo
    }

    /// ID 付きの物件をそのまま追加する
    pub fn add(&self, imovel: Imovel) {
        let mut state = self.state.lock().unwrap();
        state.last_id = state.last_id.max(imovel.id().as_i64());
        state.imoveis.push(imovel);
    }

    /// 現在保持している物件のスナップショット
    pub fn snapshot(&self) -> Vec<Imovel> {
        self.state.lock().unwrap().imoveis.clone()
    }

    fn check_reachable(&self) -> Result<(), InfraError> {
        if self.state.lock().unwrap().unreachable {
            return Err(InfraError::connection(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "mock database is unreachable",
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl ImovelRepository for MockImovelRepository {
    async fn find_all(&self) -> Result<Vec<Imovel>, InfraError> {
        self.check_reachable()?;
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: ImovelId) -> Result<Option<Imovel>, InfraError> {
        self.check_reachable()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .imoveis
            .iter()
            .find(|i| i.id() == id)
            .cloned())
    }

    async fn find_by_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, InfraError> {
        self.check_reachable()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .imoveis
            .iter()
            .filter(|i| i.tipo().as_str() == Some(tipo))
            .cloned()
            .collect())
    }

    async fn insert(&self, data: &ImovelData) -> Result<ImovelId, InfraError> {
        self.check_reachable()?;
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let id = ImovelId::from_i64(state.last_id);
        state.imoveis.push(Imovel::new(id, data.clone()));
        Ok(id)
    }

    async fn update(&self, id: ImovelId, data: &ImovelData) -> Result<(), InfraError> {
        self.check_reachable()?;
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.imoveis.iter_mut().find(|i| i.id() == id) {
            *slot = Imovel::new(id, data.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: ImovelId) -> Result<(), InfraError> {
        self.check_reachable()?;
        self.state.lock().unwrap().imoveis.retain(|i| i.id() != id);
        Ok(())
    }
}
