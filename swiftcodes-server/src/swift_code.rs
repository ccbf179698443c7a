use actix_web::{HttpResponse, web};

use crate::ServerResult;
use crate::config::Config;
use crate::service::{self, NewSwiftCode};

pub(crate) async fn get(path: web::Path<String>, settings: web::Data<Config>) -> ServerResult {
    let db = settings.store.get_db().await?;
    let details = service::get_by_code(&db, &path)?;
    Ok(HttpResponse::Ok().json(details))
}

pub(crate) async fn by_country(
    path: web::Path<String>,
    settings: web::Data<Config>,
) -> ServerResult {
    let db = settings.store.get_db().await?;
    let country = service::get_by_country(&db, &path)?;
    Ok(HttpResponse::Ok().json(country))
}

pub(crate) async fn create(
    body: web::Json<NewSwiftCode>,
    settings: web::Data<Config>,
) -> ServerResult {
    let mut db = settings.store.get_db().await?;
    let message = service::create(&mut db, body.into_inner())?;
    Ok(HttpResponse::Created().json(message))
}

pub(crate) async fn delete(path: web::Path<String>, settings: web::Data<Config>) -> ServerResult {
    let mut db = settings.store.get_db().await?;
    let message = service::delete(&mut db, &path)?;
    Ok(HttpResponse::Ok().json(message))
}
