use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::profile::schema::ProfileEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub bio: Option<String>,
    pub followers: Vec<Uuid>,
    pub following: Vec<Uuid>,
}

impl From<ProfileEntity> for ProfileResponse {
    fn from(profile: ProfileEntity) -> Self {
        ProfileResponse {
            user_id: profile.user_id,
            display_name: profile.display_name,
            bio: profile.bio,
            followers: profile.followers,
            following: profile.following,
        }
    }
}
