use crate::{database::MongoDB, models::Assignment, utils::error::AppError};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UploadAssignmentRequest {
    #[serde(rename = "courseId")]
    pub course_id: String,
    pub week: String,
    #[serde(rename = "fileLink")]
    pub file_link: String,
}

/// All three fields must be present and non-empty before anything touches
/// the store.
pub fn validate_upload(request: &UploadAssignmentRequest) -> Result<(), AppError> {
    if request.course_id.trim().is_empty()
        || request.week.trim().is_empty()
        || request.file_link.trim().is_empty()
    {
        return Err(AppError::MissingField(
            "Course ID, week, and file link are required".to_string(),
        ));
    }
    Ok(())
}

/// Records an uploaded assignment link. Repeated uploads for the same
/// (course, week) accumulate; there is no uniqueness constraint there.
pub async fn record_assignment(
    db: &MongoDB,
    request: &UploadAssignmentRequest,
) -> Result<Assignment, AppError> {
    validate_upload(request)?;

    let course_oid = ObjectId::parse_str(&request.course_id)
        .map_err(|_| AppError::NotFound("Course".to_string()))?;

    ensure_assignments_collection(db).await?;

    let mut assignment = Assignment {
        _id: None,
        course_id: course_oid,
        week: request.week.clone(),
        file_link: request.file_link.clone(),
        uploaded_at: BsonDateTime::now(),
    };

    let collection = db.collection::<Assignment>("assignments");
    let result = collection
        .insert_one(&assignment)
        .await
        .map_err(AppError::store)?;

    assignment._id = result.inserted_id.as_object_id();
    Ok(assignment)
}

/// Provisions the backing collection before the first insert. Creating a
/// collection that already exists is skipped, so this is idempotent.
async fn ensure_assignments_collection(db: &MongoDB) -> Result<(), AppError> {
    let names = db
        .database()
        .list_collection_names()
        .await
        .map_err(AppError::store)?;

    if !names.iter().any(|name| name == "assignments") {
        log::info!("Creating assignments collection");
        db.database()
            .create_collection("assignments")
            .await
            .map_err(AppError::store)?;
    }

    Ok(())
}
