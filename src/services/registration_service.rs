use crate::{database::MongoDB, models::Course, services::auth_service, utils::error::AppError};
use mongodb::bson::{doc, oid::ObjectId};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
}

/// Registers a student into a course roster.
///
/// Account provisioning is idempotent, and the roster append is a single
/// atomic `$push` against the course document, so two concurrent
/// registrations cannot drop each other's writes. The `$ne` filter makes
/// re-registering the same email a no-op instead of a duplicate roster entry.
pub async fn register_student(
    db: &MongoDB,
    course_id: &str,
    request: &RegisterStudentRequest,
) -> Result<Course, AppError> {
    let oid =
        ObjectId::parse_str(course_id).map_err(|_| AppError::NotFound("Course".to_string()))?;

    let collection = db.collection::<Course>("courses");

    // Course first: failing here before touching the users collection keeps
    // a missing course from leaving a half-done registration behind.
    collection
        .find_one(doc! { "_id": oid })
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))?;

    auth_service::ensure_default_user(db, &request.email, &request.student_id).await?;

    let entry = doc! {
        "name": &request.name,
        "email": &request.email,
        "id": &request.student_id,
    };

    collection
        .update_one(
            doc! { "_id": oid, "students.email": { "$ne": &request.email } },
            doc! { "$push": { "students": entry } },
        )
        .await
        .map_err(AppError::store)?;

    // With the course known to exist, a zero-match update just means the
    // student was already on the roster; either way return the stored course.
    collection
        .find_one(doc! { "_id": oid })
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCourseRequest;
    use crate::services::course_service;
    use uuid::Uuid;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/CourseServiceTest".to_string());
        MongoDB::new(&uri).await.expect("test database")
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_register_student_appends_single_roster_entry() {
        let db = test_db().await;
        let suffix = Uuid::new_v4().simple().to_string();

        let course = course_service::create_course(
            &db,
            &CreateCourseRequest {
                name: "Rust 101".to_string(),
                course_id: format!("C-{}", suffix),
                description: "Intro".to_string(),
                duration: "8 weeks".to_string(),
                cover_image: None,
            },
        )
        .await
        .unwrap();
        let course_hex = course._id.unwrap().to_hex();

        let request = RegisterStudentRequest {
            name: "Jo".to_string(),
            email: format!("jo-{}@x.com", suffix),
            student_id: format!("S{}", suffix),
        };

        let updated = register_student(&db, &course_hex, &request).await.unwrap();
        assert_eq!(updated.students.len(), 1);
        assert_eq!(updated.students[0].name, "Jo");
        assert_eq!(updated.students[0].email, request.email);
        assert_eq!(updated.students[0].external_id, request.student_id);

        // Registering the same student again leaves the roster unchanged.
        let again = register_student(&db, &course_hex, &request).await.unwrap();
        assert_eq!(again.students.len(), 1);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_register_student_missing_course_is_not_found() {
        let db = test_db().await;
        let suffix = Uuid::new_v4().simple().to_string();

        let request = RegisterStudentRequest {
            name: "Jo".to_string(),
            email: format!("ghost-{}@x.com", suffix),
            student_id: format!("S{}", suffix),
        };

        let missing = register_student(&db, &ObjectId::new().to_hex(), &request).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
