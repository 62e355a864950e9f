use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Roster entry embedded in a course: a denormalized snapshot of the
/// student at enrollment time, not a join against `users`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    #[serde(rename = "id")]
    pub external_id: String,
}

/// Course content entry. Reserved for week-by-week materials; the active
/// upload path writes `Assignment` rows instead.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Material {
    pub week: String,
    pub note: String,
    pub file: String,
}

/// Course document (`courses` collection). `courseID` is covered by a unique
/// index. The embedded sequences are owned by the course and keep insertion
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub _id: Option<ObjectId>,
    pub name: String,
    #[serde(rename = "courseID")]
    pub course_id: String,
    pub description: String,
    pub duration: String,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

/// Request to create a course. `coverImage` is an optional path reference to
/// an already-uploaded asset; file storage itself lives outside this service.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateCourseRequest {
    pub name: String,
    #[serde(rename = "courseID")]
    pub course_id: String,
    pub description: String,
    pub duration: String,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<String>,
}
