use actix_web::{get, put, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_caller,
    modules::profile::{
        model::ProfileResponse, repository_mem::ProfileRepositoryMem, service::ProfileService,
    },
};

pub type ProfileSvc = ProfileService<ProfileRepositoryMem>;

#[get("/{user_id}")]
pub async fn get_profile(
    profile_service: web::Data<ProfileSvc>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<ProfileResponse>, error::Error> {
    let profile = profile_service.get_profile(*user_id).await?;
    Ok(success::Success::ok(Some(profile)).message("Profile retrieved successfully"))
}

#[put("/{target_id}/follow")]
pub async fn follow_user(
    profile_service: web::Data<ProfileSvc>,
    target_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_caller(&req)?.id;
    profile_service.follow(user_id, *target_id).await?;
    Ok(success::Success::ok(None).message("Followed successfully"))
}
