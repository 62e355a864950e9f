use crate::{
    database::MongoDB,
    models::{Course, CreateCourseRequest},
    utils::error::AppError,
};
use mongodb::bson::{doc, oid::ObjectId};

/// Inserts a course with empty roster and materials. A `courseID` collision
/// surfaces as `DuplicateKey` via the unique index.
pub async fn create_course(db: &MongoDB, request: &CreateCourseRequest) -> Result<Course, AppError> {
    let collection = db.collection::<Course>("courses");

    let mut new_course = Course {
        _id: None,
        name: request.name.clone(),
        course_id: request.course_id.clone(),
        description: request.description.clone(),
        duration: request.duration.clone(),
        cover_image: request.cover_image.clone().filter(|path| !path.is_empty()),
        students: Vec::new(),
        materials: Vec::new(),
    };

    let result = collection
        .insert_one(&new_course)
        .await
        .map_err(|e| AppError::insert("Course", e))?;

    new_course._id = result.inserted_id.as_object_id();
    Ok(new_course)
}

/// Full collection, no pagination. Fine at this service's scale.
pub async fn get_all_courses(db: &MongoDB) -> Result<Vec<Course>, AppError> {
    let collection = db.collection::<Course>("courses");

    let mut cursor = collection.find(doc! {}).await.map_err(AppError::store)?;

    let mut courses = Vec::new();
    use futures::stream::StreamExt;

    while let Some(result) = cursor.next().await {
        match result {
            Ok(course) => courses.push(course),
            Err(e) => log::error!("Error reading course: {}", e),
        }
    }

    Ok(courses)
}

/// Looks up a course by its document id. An unparseable id means no course
/// can match, so it reports `NotFound` like any other miss.
pub async fn get_course_by_id(db: &MongoDB, id: &str) -> Result<Course, AppError> {
    let oid = ObjectId::parse_str(id).map_err(|_| AppError::NotFound("Course".to_string()))?;

    let collection = db.collection::<Course>("courses");

    collection
        .find_one(doc! { "_id": oid })
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))
}

/// Every course whose roster contains the given email, in store order.
pub async fn list_by_student_email(db: &MongoDB, email: &str) -> Result<Vec<Course>, AppError> {
    let collection = db.collection::<Course>("courses");

    let mut cursor = collection
        .find(doc! { "students.email": email })
        .await
        .map_err(AppError::store)?;

    let mut courses = Vec::new();
    use futures::stream::StreamExt;

    while let Some(result) = cursor.next().await {
        match result {
            Ok(course) => courses.push(course),
            Err(e) => log::error!("Error reading course: {}", e),
        }
    }

    Ok(courses)
}
