use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpMessage, HttpRequest,
};
use uuid::Uuid;

use crate::{api::error, modules::user::service::UserService};

/// Caller identity resolved by the session layer upstream. Handles never
/// reach this service; the `X-User-Id` header carries the opaque id.
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    pub id: Uuid,
}

pub async fn caller_identity<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let header = req.headers().get("X-User-Id").and_then(|h| h.to_str().ok());
    let id = match header.and_then(|v| Uuid::parse_str(v).ok()) {
        Some(id) => id,
        None => {
            return Err(error::Error::unauthorized("Missing or invalid X-User-Id header").into());
        }
    };

    let users = req
        .app_data::<web::Data<UserService>>()
        .ok_or_else(error::Error::internal_server_error)?;

    if !users.exists(&id).await.map_err(error::Error::from)? {
        return Err(error::Error::unauthorized("Unknown caller identity").into());
    }

    req.extensions_mut().insert(CallerIdentity { id });

    next.call(req).await
}

pub fn get_caller(req: &HttpRequest) -> Result<CallerIdentity, error::Error> {
    let extensions = req.extensions();

    let caller = extensions
        .get::<CallerIdentity>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?;

    Ok(*caller)
}
