use actix_web::{HttpResponse, http};

pub(crate) async fn get() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((http::header::CONTENT_TYPE, "text/plain"))
        .body("OK\n")
}
