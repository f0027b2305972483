use actix_web::{delete, get, post, put, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_caller,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse, SendRequestOutcome},
            repository_mem::FriendRepositoryMem,
            service::FriendService,
        },
        user::repository_mem::UserRepositoryMem,
    },
};

pub type FriendSvc = FriendService<FriendRepositoryMem, UserRepositoryMem>;

#[get("")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = get_caller(&req)?.id;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[delete("/{friend_id}")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    friend_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_caller(&req)?.id;
    friend_service.remove_friend(user_id, *friend_id).await?;
    Ok(success::Success::no_content())
}

#[get("/requests")]
pub async fn list_friend_requests(
    friend_service: web::Data<FriendSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_caller(&req)?.id;
    let requests = friend_service.get_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[post("/requests/{to}")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendSvc>,
    to: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<serde_json::Value>, error::Error> {
    let sender_id = get_caller(&req)?.id;

    match friend_service.send_request(sender_id, *to).await? {
        SendRequestOutcome::Pending(request) => {
            let data = serde_json::to_value(request).map_err(error::SystemError::from)?;
            Ok(success::Success::created(Some(data)).message("Friend request sent successfully"))
        }
        SendRequestOutcome::AutoAccepted(friend) => {
            let data = serde_json::to_value(friend).map_err(error::SystemError::from)?;
            Ok(success::Success::ok(Some(data))
                .message("Reciprocal friend request accepted"))
        }
    }
}

#[delete("/requests/{to}")]
pub async fn withdraw_friend_request(
    friend_service: web::Data<FriendSvc>,
    to: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let sender_id = get_caller(&req)?.id;
    friend_service.remove_request(sender_id, *to).await?;
    Ok(success::Success::no_content())
}

#[put("/accept/{from}")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendSvc>,
    from: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendResponse>, error::Error> {
    let receiver_id = get_caller(&req)?.id;
    let response = friend_service.accept_request(receiver_id, *from).await?;

    Ok(success::Success::ok(Some(response)).message("Friend request accepted successfully"))
}

#[put("/reject/{from}")]
pub async fn reject_friend_request(
    friend_service: web::Data<FriendSvc>,
    from: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let receiver_id = get_caller(&req)?.id;
    friend_service.reject_request(receiver_id, *from).await?;
    Ok(success::Success::no_content())
}
