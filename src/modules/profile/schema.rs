use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user profile document. `followers` and `following` are semantically
/// sets; membership is checked before every append. The two arrays mirror
/// each other across documents: `u` in `followers` of `t` exactly when `t`
/// in `following` of `u`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntity {
    pub user_id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
}

impl ProfileEntity {
    pub fn new(user_id: Uuid, display_name: String) -> Self {
        ProfileEntity {
            user_id,
            display_name,
            bio: None,
            followers: Vec::new(),
            following: Vec::new(),
        }
    }
}

/// Set-insert on the physically-ordered array. Returns whether it changed.
pub fn insert_member(members: &mut Vec<Uuid>, id: Uuid) -> bool {
    if members.contains(&id) {
        false
    } else {
        members.push(id);
        true
    }
}
