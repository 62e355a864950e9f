use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::services::assignment_service::{self, UploadAssignmentRequest};

#[utoipa::path(
    post,
    path = "/courses/upload",
    tag = "Assignments",
    request_body = UploadAssignmentRequest,
    responses(
        (status = 201, description = "Assignment link recorded"),
        (status = 400, description = "Course ID, week, and file link are required")
    )
)]
pub async fn upload_assignment(
    db: web::Data<MongoDB>,
    request: web::Json<UploadAssignmentRequest>,
) -> HttpResponse {
    log::info!(
        "📎 POST /courses/upload - courseId: {}, week: {}",
        request.course_id,
        request.week
    );

    match assignment_service::record_assignment(&db, &request).await {
        Ok(assignment) => {
            log::info!("✅ Assignment recorded for week {}", assignment.week);
            HttpResponse::Created().json(serde_json::json!({
                "message": "File uploaded successfully",
                "assignment": assignment
            }))
        }
        Err(e) => {
            log::warn!("❌ Assignment upload failed: {}", e);
            e.to_response()
        }
    }
}
