use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Assignment row (`assignments` collection). Written once by the upload
/// workflow; never updated or deleted. References its course by id rather
/// than being embedded, so a course document never grows with uploads.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Assignment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub _id: Option<ObjectId>,
    #[serde(rename = "courseId")]
    #[schema(value_type = String)]
    pub course_id: ObjectId,
    pub week: String,
    #[serde(rename = "fileLink")]
    pub file_link: String,
    #[serde(rename = "uploadedAt")]
    #[schema(value_type = String)]
    pub uploaded_at: BsonDateTime,
}
