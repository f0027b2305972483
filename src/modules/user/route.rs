use crate::modules::user::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/users").service(register).service(resolve_handle));
}
