use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct RegisterModel {
    #[validate(
        length(min = 3, max = 32, message = "Handle must be 3-32 characters long"),
        custom(function = crate::utils::validate_handle)
    )]
    pub handle: String,
    #[validate(length(min = 1, message = "Display name cannot be empty"))]
    pub display_name: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub id: Uuid,
}
