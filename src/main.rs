mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::token_service::JwtKeys;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Configuration is read once here; everything downstream gets it injected
    let config = Config::from_env();

    log::info!("🚀 Starting Course Service...");
    log::info!("📊 Database: {}", config.database_url);

    // Initialize MongoDB connection (provisions the unique indexes)
    let db = database::MongoDB::new(&config.database_url)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    // Signing keys are derived once and never rotated during the process
    let jwt_keys = JwtKeys::from_config(&config);

    let db_data = web::Data::new(db.clone());
    let keys_data = web::Data::new(jwt_keys);

    let bind_address = config.bind_address();

    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(keys_data.clone())
            .wrap(cors)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check & metrics
            .route("/health", web::get().to(api::health::health_check))
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // Auth endpoints
            .route("/register", web::post().to(api::auth::register))
            .route("/login", web::post().to(api::auth::login))
            // Courses
            .route("/create-course", web::post().to(api::courses::create_course))
            .route("/courses", web::get().to(api::courses::get_courses))
            .route("/courses/upload", web::post().to(api::assignments::upload_assignment))
            .route(
                "/courses/{id}/register",
                web::put().to(api::courses::register_student),
            )
            // Catch-all course lookup goes after the fixed /courses routes
            .route("/courses/{id}", web::get().to(api::courses::get_course))
            // Students
            .route("/students", web::get().to(api::students::get_students))
            // Per-user course list
            .route(
                "/api/courses/user/{email}",
                web::get().to(api::courses::get_user_courses),
            )
            // Identity echo, behind the auth gate
            .service(
                web::resource("/api/user")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route(web::get().to(api::auth::current_user)),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
