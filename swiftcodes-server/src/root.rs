use actix_web::HttpResponse;

use crate::service::Message;
use crate::{CARGO_NAME, CARGO_VERSION};

pub(crate) async fn get() -> HttpResponse {
    HttpResponse::Ok().json(Message {
        message: format!(
            "Welcome to the SWIFT Codes API ({CARGO_NAME} {CARGO_VERSION}). \
             Codes are served under /v1/swift-codes."
        ),
    })
}
