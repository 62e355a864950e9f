pub mod assignments;
pub mod auth;
pub mod courses;
pub mod health;
pub mod metrics;
pub mod students;
pub mod swagger;
