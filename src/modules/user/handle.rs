use actix_web::{get, post, web};

use crate::modules::user::model::{RegisterModel, RegisterResponse, ResolveResponse};
use crate::modules::user::service::UserService;
use crate::{
    api::{error, success},
    utils::ValidatedJson,
};

#[post("")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<RegisterModel>,
) -> Result<success::Success<RegisterResponse>, error::Error> {
    let user_id = user_service.register(user_data.0).await?;
    Ok(success::Success::created(Some(RegisterResponse { id: user_id }))
        .message("User registered successfully"))
}

#[get("/resolve/{handle}")]
pub async fn resolve_handle(
    user_service: web::Data<UserService>,
    handle: web::Path<String>,
) -> Result<success::Success<ResolveResponse>, error::Error> {
    let id = user_service.resolve(&handle).await?;
    Ok(success::Success::ok(Some(ResolveResponse { id })))
}
