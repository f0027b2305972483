use uuid::Uuid;

use crate::api::error;
use crate::modules::profile::schema::ProfileEntity;
use crate::store::Document;

#[async_trait::async_trait]
pub trait ProfileRepository {
    async fn create(
        &self,
        profile: ProfileEntity,
    ) -> Result<Document<ProfileEntity>, error::SystemError>;

    async fn find_by_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<Document<ProfileEntity>>, error::SystemError>;

    /// Compare-and-swap write: fails with `StoreError::VersionConflict`
    /// (wrapped in `SystemError::Storage`) when the document moved past
    /// `expected_version`.
    async fn update(
        &self,
        id: &Uuid,
        expected_version: u64,
        data: ProfileEntity,
    ) -> Result<Document<ProfileEntity>, error::SystemError>;
}
