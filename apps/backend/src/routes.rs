use actix_web::{web, HttpRequest, HttpResponse};

use crate::ws::session::upgrade;
use crate::AppError;

async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        "ROUTE_NOT_FOUND",
        format!("no route for {}", req.path()),
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(crate::health::configure_routes)
        .route("/ws", web::get().to(upgrade))
        .default_service(web::to(not_found));
}
