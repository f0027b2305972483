use uuid::Uuid;

use crate::api::error;
use crate::modules::user::schema::UserEntity;

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;
    async fn find_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;
    async fn create(
        &self,
        handle: &str,
        display_name: &str,
    ) -> Result<UserEntity, error::SystemError>;
}
