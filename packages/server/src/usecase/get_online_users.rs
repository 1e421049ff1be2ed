//! UseCase: オンラインユーザー一覧の取得

use std::sync::Arc;

use crate::domain::{ConnectionRepository, Identity};

/// オンラインユーザー一覧取得のユースケース
pub struct GetOnlineUsersUseCase {
    connections: Arc<dyn ConnectionRepository>,
}

impl GetOnlineUsersUseCase {
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }

    /// join 済みのアイデンティティを userId 順で返す
    pub async fn execute(&self) -> Vec<Identity> {
        let mut identities = self.connections.get_online_identities().await;
        identities.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        identities
    }
}
