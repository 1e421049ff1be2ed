//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! `ConnectionRegistry` ドメインモデルを Mutex で保護してそのまま保持します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, ConnectionRepository, Identity, RepositoryError,
};

/// インメモリ Connection Repository 実装
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    registry: Mutex<ConnectionRegistry>,
}

impl InMemoryConnectionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn register(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut registry = self.registry.lock().await;
        registry.register(connection)?;
        Ok(())
    }

    async fn bind_identity(
        &self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<Option<Identity>, RepositoryError> {
        let mut registry = self.registry.lock().await;
        Ok(registry.bind(connection_id, identity)?)
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Result<Connection, RepositoryError> {
        let mut registry = self.registry.lock().await;
        Ok(registry.unregister(connection_id)?)
    }

    async fn get_all_connection_ids(&self) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.connection_ids()
    }

    async fn get_connection_ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.connection_ids_except(exclude)
    }

    async fn get_online_identities(&self) -> Vec<Identity> {
        let registry = self.registry.lock().await;
        registry.identities()
    }

    async fn count_connections(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}
