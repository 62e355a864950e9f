use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::{Course, CreateCourseRequest, UserInfo};
use crate::services::registration_service::{self, RegisterStudentRequest};
use crate::services::{auth_service, course_service};
use crate::utils::error::AppError;

#[utoipa::path(
    post,
    path = "/create-course",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 409, description = "courseID already exists")
    )
)]
pub async fn create_course(
    db: web::Data<MongoDB>,
    request: web::Json<CreateCourseRequest>,
) -> HttpResponse {
    log::info!("📚 POST /create-course - courseID: {}", request.course_id);

    match course_service::create_course(&db, &request).await {
        Ok(course) => {
            log::info!("✅ Course created: {}", course.course_id);
            HttpResponse::Created().json(course)
        }
        Err(e) => {
            log::warn!("❌ Course creation failed: {} - {:?}", request.course_id, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    responses(
        (status = 200, description = "All courses", body = [Course])
    )
)]
pub async fn get_courses(db: web::Data<MongoDB>) -> HttpResponse {
    match course_service::get_all_courses(&db).await {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(e) => {
            log::error!("❌ Failed to fetch courses: {:?}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course document id")),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();

    match course_service::get_course_by_id(&db, &id).await {
        Ok(course) => HttpResponse::Ok().json(course),
        Err(e) => {
            log::warn!("❌ Failed to fetch course {}: {}", id, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/courses/{id}/register",
    tag = "Courses",
    params(("id" = String, Path, description = "Course document id")),
    request_body = RegisterStudentRequest,
    responses(
        (status = 200, description = "Student registered, updated course returned", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn register_student(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<RegisterStudentRequest>,
) -> HttpResponse {
    let course_id = path.into_inner();
    log::info!(
        "🎓 PUT /courses/{}/register - email: {}",
        course_id,
        request.email
    );

    match registration_service::register_student(&db, &course_id, &request).await {
        Ok(course) => {
            log::info!("✅ Student registered: {}", request.email);
            HttpResponse::Ok().json(course)
        }
        Err(e) => {
            log::warn!("❌ Student registration failed: {} - {:?}", request.email, e);
            e.to_response()
        }
    }
}

/// A student's personal course list: the account plus every course whose
/// roster carries their email.
pub async fn get_user_courses(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();

    let user = match auth_service::find_by_email(&db, &email).await {
        Ok(Some(user)) => user,
        Ok(None) => return AppError::NotFound("User".to_string()).to_response(),
        Err(e) => {
            log::error!("❌ Failed to fetch user {}: {:?}", email, e);
            return e.to_response();
        }
    };

    match course_service::list_by_student_email(&db, &email).await {
        Ok(courses) => HttpResponse::Ok().json(serde_json::json!({
            "user": UserInfo::from(user),
            "courses": courses
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch courses for {}: {:?}", email, e);
            e.to_response()
        }
    }
}
