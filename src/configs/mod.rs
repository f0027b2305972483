use crate::modules::friend::schema::{FriendRequestEntity, FriendshipEntity};
use crate::modules::profile::schema::ProfileEntity;
use crate::modules::user::schema::UserEntity;
use crate::store::Collection;

/// Handle to the document-store collaborator: one collection per entity
/// type. Clones share the underlying collections, so this passes around the
/// way a connection pool would.
#[derive(Clone)]
pub struct DocStore {
    pub users: Collection<UserEntity>,
    pub profiles: Collection<ProfileEntity>,
    pub friend_requests: Collection<FriendRequestEntity>,
    pub friendships: Collection<FriendshipEntity>,
}

impl DocStore {
    pub fn new() -> Self {
        Self {
            users: Collection::new(),
            profiles: Collection::new(),
            friend_requests: Collection::new(),
            friendships: Collection::new(),
        }
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
