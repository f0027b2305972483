use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::user::schema::UserEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendResponse {
    pub id: Uuid,
    pub handle: String,
    pub display_name: String,
}

impl From<UserEntity> for FriendResponse {
    fn from(user: UserEntity) -> Self {
        FriendResponse { id: user.id, handle: user.handle, display_name: user.display_name }
    }
}

/// One entry of the caller's pending inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub from: FriendResponse,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentRequestResponse {
    pub id: Uuid,
    pub to_user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Outcome of sending a request. A reciprocal pending request from the
/// recipient resolves as an acceptance rather than a second pending edge.
#[derive(Debug)]
pub enum SendRequestOutcome {
    Pending(SentRequestResponse),
    AutoAccepted(FriendResponse),
}
