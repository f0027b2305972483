use actix_web::{web, FromRequest};
use futures_util::future::LocalBoxFuture;
use validator::{Validate, ValidationError};

use crate::api::error;

pub fn validate_handle(handle: &str) -> Result<(), ValidationError> {
    if handle.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        Ok(())
    } else {
        let mut err = ValidationError::new("handle_charset");
        err.message = Some("Handle may only contain a-z, 0-9 and _".into());
        Err(err)
    }
}

pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let json = fut.await.map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            let model = json.into_inner();
            model.validate().map_err(|e| error::Error::BadRequest(e.to_string().into()))?;
            Ok(ValidatedJson(model))
        })
    }
}
