#![allow(unused)]
use actix_web::{
    http::StatusCode,
    HttpResponse, ResponseError,
};
use std::borrow::Cow;

use crate::store::StoreError;
use crate::ENV;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn internal_server_error() -> Self {
        Self::InternalServer
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let header = ("Access-Control-Allow-Origin", ENV.frontend_url.as_str());
        let mut res = HttpResponse::build(self.status_code());

        res.insert_header(header);
        res.insert_header(("Access-Control-Allow-Credentials", "true"));

        match self {
            // Has Message
            Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::Unauthorized(msg)
            | Error::BadRequest(msg)
            | Error::Forbidden(msg) => res.json(ErrorBody { message: msg.clone() }),
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

/// Typed failures of the relationship operations. Callers can tell "your
/// request was invalid" (these) apart from "the system could not complete the
/// operation" (`SystemError::Storage` and friends).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Cannot send a friend request to yourself")]
    SelfRequest,
    #[error("Cannot follow yourself")]
    SelfFollow,
    #[error("Friend request already exists")]
    DuplicateRequest,
    #[error("Users are already friends")]
    AlreadyFriends,
    #[error("Friend request not found")]
    RequestNotFound,
    #[error("Friendship not found")]
    FriendshipNotFound,
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Handle already taken")]
    HandleTaken,
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    // storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    // serde errors
    #[error("JSON Serialization/Deserialization Error")]
    JsonError(#[from] serde_json::Error),
}

impl SystemError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            SystemError::Domain(d) => Some(d),
            _ => None,
        }
    }
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::Domain(domain) => match domain {
                DomainError::SelfRequest | DomainError::SelfFollow => {
                    Error::BadRequest(domain.to_string().into())
                }
                DomainError::DuplicateRequest
                | DomainError::AlreadyFriends
                | DomainError::HandleTaken => Error::Conflict(domain.to_string().into()),
                DomainError::RequestNotFound
                | DomainError::FriendshipNotFound
                | DomainError::ProfileNotFound
                | DomainError::UserNotFound => Error::NotFound(domain.to_string().into()),
            },
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}
