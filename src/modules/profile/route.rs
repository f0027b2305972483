use crate::modules::profile::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/profiles").service(follow_user).service(get_profile));
}
