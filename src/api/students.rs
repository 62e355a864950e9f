use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::UserInfo;
use crate::services::auth_service;

#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    responses(
        (status = 200, description = "All student accounts", body = [UserInfo])
    )
)]
pub async fn get_students(db: web::Data<MongoDB>) -> HttpResponse {
    match auth_service::list_students(&db).await {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(e) => {
            log::error!("❌ Failed to fetch students: {:?}", e);
            e.to_response()
        }
    }
}
