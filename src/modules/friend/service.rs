use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    api::error::DomainError,
    modules::{
        friend::{
            model::{
                FriendRequestResponse, FriendResponse, SendRequestOutcome, SentRequestResponse,
            },
            repository::FriendRepo,
        },
        user::repository::UserRepository,
    },
    store::StoreError,
};

/// Attempts of the take-or-create loop in `send_request` before the write is
/// reported as a storage failure.
const SEND_RETRIES: usize = 3;

#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: FriendRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendService<R, U>
where
    R: FriendRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friend_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        FriendService { friend_repo, user_repo }
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let edges = self.friend_repo.find_friendships_of(&user_id).await?;

        let mut friends = Vec::with_capacity(edges.len());
        for edge in edges {
            let other =
                if edge.data.user_a == user_id { edge.data.user_b } else { edge.data.user_a };
            let user = self
                .user_repo
                .find_by_id(&other)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            friends.push(FriendResponse::from(user));
        }
        Ok(friends)
    }

    pub async fn remove_friend(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<(), error::SystemError> {
        // The edge is one canonical document, so deletion is mutual by
        // construction; either side may initiate it.
        if !self.friend_repo.delete_friendship(&user_id, &friend_id).await? {
            return Err(DomainError::FriendshipNotFound.into());
        }
        Ok(())
    }

    pub async fn send_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<SendRequestOutcome, error::SystemError> {
        if receiver_id == sender_id {
            return Err(DomainError::SelfRequest.into());
        }

        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(DomainError::UserNotFound.into());
        }

        if self.friend_repo.find_friendship(&sender_id, &receiver_id).await?.is_some() {
            return Err(DomainError::AlreadyFriends.into());
        }

        for _ in 0..SEND_RETRIES {
            // Reciprocal pending request from the receiver: both sides want
            // the friendship, so consume that request and confirm the edge
            // instead of stacking a second pending record.
            if let Some(reverse) = self.friend_repo.take_request(&receiver_id, &sender_id).await?
            {
                self.friend_repo.create_friendship(&sender_id, &receiver_id).await?;
                log::info!(
                    "Reciprocal friend request between {} and {} resolved as acceptance",
                    sender_id,
                    receiver_id
                );
                let friend = self
                    .user_repo
                    .find_by_id(&reverse.data.from_user_id)
                    .await?
                    .ok_or(DomainError::UserNotFound)?;
                return Ok(SendRequestOutcome::AutoAccepted(FriendResponse::from(friend)));
            }

            // The create excludes both orientations atomically, so two
            // racing sends for one pair resolve to a single winner here.
            match self.friend_repo.create_request(&sender_id, &receiver_id).await {
                Ok(request) => {
                    return Ok(SendRequestOutcome::Pending(SentRequestResponse {
                        id: request.id,
                        to_user_id: request.data.to_user_id,
                        created_at: request.created_at,
                    }));
                }
                Err(error::SystemError::Storage(StoreError::AlreadyExists)) => {
                    if self.friend_repo.find_request(&sender_id, &receiver_id).await?.is_some() {
                        return Err(DomainError::DuplicateRequest.into());
                    }
                    // A reciprocal send won the race; take its request on
                    // the next pass.
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(error::SystemError::Storage(StoreError::AlreadyExists))
    }

    /// Withdraws a request the caller sent. Friendship edges are untouched.
    pub async fn remove_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<(), error::SystemError> {
        self.friend_repo
            .take_request(&sender_id, &receiver_id)
            .await?
            .ok_or(DomainError::RequestNotFound)?;
        Ok(())
    }

    /// `receiver_id` accepts the pending request sent by `sender_id`. Taking
    /// the request first is what makes racing resolvers deterministic: the
    /// loser finds nothing and gets `RequestNotFound`.
    pub async fn accept_request(
        &self,
        receiver_id: Uuid,
        sender_id: Uuid,
    ) -> Result<FriendResponse, error::SystemError> {
        let request = self
            .friend_repo
            .take_request(&sender_id, &receiver_id)
            .await?
            .ok_or(DomainError::RequestNotFound)?;

        self.friend_repo.create_friendship(&sender_id, &receiver_id).await?;

        let from_user = self
            .user_repo
            .find_by_id(&request.data.from_user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        Ok(FriendResponse::from(from_user))
    }

    pub async fn reject_request(
        &self,
        receiver_id: Uuid,
        sender_id: Uuid,
    ) -> Result<(), error::SystemError> {
        self.friend_repo
            .take_request(&sender_id, &receiver_id)
            .await?
            .ok_or(DomainError::RequestNotFound)?;
        Ok(())
    }

    /// Pending requests addressed to `user_id`, oldest first.
    pub async fn get_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let requests = self.friend_repo.find_requests_to(&user_id).await?;

        let mut inbox = Vec::with_capacity(requests.len());
        for request in requests {
            let from_user = self
                .user_repo
                .find_by_id(&request.data.from_user_id)
                .await?
                .ok_or(DomainError::UserNotFound)?;
            inbox.push(FriendRequestResponse {
                id: request.id,
                from: FriendResponse::from(from_user),
                created_at: request.created_at,
            });
        }
        Ok(inbox)
    }
}
