use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Service API",
        version = "1.0.0",
        description = "Course-management backend: authentication, course catalog, student registration, and assignment links.\n\n**Authentication:** `/api/user` requires a JWT passed in the `Authorization` header.",
    ),
    paths(
        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,

        // Courses
        crate::api::courses::create_course,
        crate::api::courses::get_courses,
        crate::api::courses::get_course,
        crate::api::courses::register_student,

        // Students
        crate::api::students::get_students,

        // Assignments
        crate::api::assignments::upload_assignment,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::models::user::Role,
            crate::models::user::UserInfo,

            // Courses
            crate::models::course::Course,
            crate::models::course::StudentRecord,
            crate::models::course::Material,
            crate::models::course::CreateCourseRequest,
            crate::services::registration_service::RegisterStudentRequest,

            // Assignments
            crate::models::assignment::Assignment,
            crate::services::assignment_service::UploadAssignmentRequest,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login. Both return a signed token valid for one hour."),
        (name = "Courses", description = "Course catalog and roster registration."),
        (name = "Students", description = "Student account listing."),
        (name = "Assignments", description = "Assignment link recording."),
        (name = "Health", description = "Health check and request counters."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
