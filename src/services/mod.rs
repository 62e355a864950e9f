pub mod assignment_service;
pub mod auth_service;
pub mod course_service;
pub mod registration_service;
pub mod token_service;
