use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record. The id is minted here and everything else in the system
/// only ever references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    pub id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
