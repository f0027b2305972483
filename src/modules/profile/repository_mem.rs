use uuid::Uuid;

use crate::{
    api::error,
    configs::DocStore,
    modules::profile::{repository::ProfileRepository, schema::ProfileEntity},
    store::Document,
};

#[derive(Clone)]
pub struct ProfileRepositoryMem {
    store: DocStore,
}

impl ProfileRepositoryMem {
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for ProfileRepositoryMem {
    async fn create(
        &self,
        profile: ProfileEntity,
    ) -> Result<Document<ProfileEntity>, error::SystemError> {
        Ok(self.store.profiles.insert(profile).await)
    }

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<Document<ProfileEntity>>, error::SystemError> {
        Ok(self.store.profiles.find_one(|p| p.user_id == *user_id).await)
    }

    async fn update(
        &self,
        id: &Uuid,
        expected_version: u64,
        data: ProfileEntity,
    ) -> Result<Document<ProfileEntity>, error::SystemError> {
        Ok(self.store.profiles.update(id, expected_version, data).await?)
    }
}
