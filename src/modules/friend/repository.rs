use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::schema::{FriendRequestEntity, FriendshipEntity};
use crate::store::Document;

#[async_trait::async_trait]
pub trait FriendshipRepository {
    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<Document<FriendshipEntity>>, error::SystemError>;

    async fn find_friendships_of(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Document<FriendshipEntity>>, error::SystemError>;

    /// Idempotent: creating an edge that already exists is a no-op.
    async fn create_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<(), error::SystemError>;

    /// Returns whether an edge was actually deleted.
    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    async fn find_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<Document<FriendRequestEntity>>, error::SystemError>;

    async fn find_requests_to(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Document<FriendRequestEntity>>, error::SystemError>;

    /// Exclusive create: fails with `StoreError::AlreadyExists` (wrapped in
    /// `SystemError::Storage`) when a pending request already exists between
    /// the pair in either direction. The exclusion and the insert happen
    /// atomically, so racing sends cannot stack two pending records.
    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Document<FriendRequestEntity>, error::SystemError>;

    /// Atomically removes and returns the pending request, if any. Of two
    /// racing resolvers exactly one receives it; the other gets `None` and
    /// must surface `RequestNotFound`.
    async fn take_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<Document<FriendRequestEntity>>, error::SystemError>;
}

pub trait FriendRepo: FriendshipRepository + FriendRequestRepository + Send + Sync {}
