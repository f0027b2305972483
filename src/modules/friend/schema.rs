use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed pending request. Resolution (accept, reject, withdraw) deletes
/// the document; terminal states are never stored, so a fresh request can
/// follow immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestEntity {
    pub from_user_id: Uuid,
    pub to_user_id: Uuid,
}

/// Confirmed friendship edge. Always stored canonically with
/// `user_a < user_b`, so one document serves both sides and lookups never
/// have to try two orientations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendshipEntity {
    pub user_a: Uuid,
    pub user_b: Uuid,
}

pub fn canonical_pair(a: &Uuid, b: &Uuid) -> (Uuid, Uuid) {
    if a <= b {
        (*a, *b)
    } else {
        (*b, *a)
    }
}
