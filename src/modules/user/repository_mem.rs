use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::error,
    configs::DocStore,
    modules::user::{repository::UserRepository, schema::UserEntity},
};

#[derive(Clone)]
pub struct UserRepositoryMem {
    store: DocStore,
}

impl UserRepositoryMem {
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryMem {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.store.users.find_one(|u| u.id == *id).await.map(|d| d.data))
    }

    async fn find_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.store.users.find_one(|u| u.handle == handle).await.map(|d| d.data))
    }

    async fn create(
        &self,
        handle: &str,
        display_name: &str,
    ) -> Result<UserEntity, error::SystemError> {
        let user = UserEntity {
            id: Uuid::now_v7(),
            handle: handle.to_owned(),
            display_name: display_name.to_owned(),
            created_at: Utc::now(),
        };
        self.store.users.insert(user.clone()).await;
        Ok(user)
    }
}
