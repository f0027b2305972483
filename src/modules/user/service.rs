use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::api::error::DomainError;
use crate::modules::profile::{repository::ProfileRepository, schema::ProfileEntity};
use crate::modules::user::model::RegisterModel;
use crate::modules::user::repository::UserRepository;

/// Identity resolver: mints identities, maps handles to ids and answers
/// existence checks for the relationship operations.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, profile_repo }
    }

    /// Mints a new identity and its (empty) profile document.
    pub async fn register(&self, data: RegisterModel) -> Result<Uuid, error::SystemError> {
        if self.repo.find_by_handle(&data.handle).await?.is_some() {
            return Err(DomainError::HandleTaken.into());
        }

        let user = self.repo.create(&data.handle, &data.display_name).await?;
        self.profile_repo.create(ProfileEntity::new(user.id, user.display_name.clone())).await?;

        info!("Registered user {} as {}", user.handle, user.id);
        Ok(user.id)
    }

    pub async fn resolve(&self, handle: &str) -> Result<Uuid, error::SystemError> {
        let user = self
            .repo
            .find_by_handle(handle)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        Ok(user.id)
    }

    pub async fn exists(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        Ok(self.repo.find_by_id(id).await?.is_some())
    }
}
