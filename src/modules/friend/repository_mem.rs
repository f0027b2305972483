use uuid::Uuid;

use crate::{
    api::error,
    configs::DocStore,
    modules::friend::{
        repository::{FriendRepo, FriendRequestRepository, FriendshipRepository},
        schema::{canonical_pair, FriendRequestEntity, FriendshipEntity},
    },
    store::Document,
};

#[derive(Clone)]
pub struct FriendRepositoryMem {
    store: DocStore,
}

impl FriendRepositoryMem {
    pub fn new(store: DocStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl FriendshipRepository for FriendRepositoryMem {
    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<Document<FriendshipEntity>>, error::SystemError> {
        let (user_a, user_b) = canonical_pair(user_id_a, user_id_b);
        Ok(self
            .store
            .friendships
            .find_one(|f| f.user_a == user_a && f.user_b == user_b)
            .await)
    }

    async fn find_friendships_of(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Document<FriendshipEntity>>, error::SystemError> {
        Ok(self
            .store
            .friendships
            .find_many(|f| f.user_a == *user_id || f.user_b == *user_id)
            .await)
    }

    async fn create_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<(), error::SystemError> {
        let (user_a, user_b) = canonical_pair(user_id_a, user_id_b);
        if self
            .store
            .friendships
            .find_one(|f| f.user_a == user_a && f.user_b == user_b)
            .await
            .is_some()
        {
            return Ok(());
        }
        self.store.friendships.insert(FriendshipEntity { user_a, user_b }).await;
        Ok(())
    }

    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let (user_a, user_b) = canonical_pair(user_id_a, user_id_b);
        Ok(self
            .store
            .friendships
            .take_one(|f| f.user_a == user_a && f.user_b == user_b)
            .await
            .is_some())
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendRepositoryMem {
    async fn find_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<Document<FriendRequestEntity>>, error::SystemError> {
        Ok(self
            .store
            .friend_requests
            .find_one(|r| r.from_user_id == *sender_id && r.to_user_id == *receiver_id)
            .await)
    }

    async fn find_requests_to(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Document<FriendRequestEntity>>, error::SystemError> {
        Ok(self.store.friend_requests.find_many(|r| r.to_user_id == *user_id).await)
    }

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Document<FriendRequestEntity>, error::SystemError> {
        let request = self
            .store
            .friend_requests
            .insert_if_absent(
                |r| {
                    (r.from_user_id == *sender_id && r.to_user_id == *receiver_id)
                        || (r.from_user_id == *receiver_id && r.to_user_id == *sender_id)
                },
                FriendRequestEntity {
                    from_user_id: *sender_id,
                    to_user_id: *receiver_id,
                },
            )
            .await?;
        Ok(request)
    }

    async fn take_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<Document<FriendRequestEntity>>, error::SystemError> {
        Ok(self
            .store
            .friend_requests
            .take_one(|r| r.from_user_id == *sender_id && r.to_user_id == *receiver_id)
            .await)
    }
}

impl FriendRepo for FriendRepositoryMem {}
