use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use crate::database::MongoDB;
use crate::services::auth_service::{self, LoginRequest, RegisterRequest};
use crate::services::token_service::{self, Claims, JwtKeys};
use crate::utils::error::AppError;

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered, token returned"),
        (status = 409, description = "Email or id already registered")
    )
)]
pub async fn register(
    db: web::Data<MongoDB>,
    keys: web::Data<JwtKeys>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    log::info!("📝 POST /register - email: {}", request.email);

    let user = match auth_service::register_user(&db, &request).await {
        Ok(user) => user,
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {:?}", request.email, e);
            return e.to_response();
        }
    };

    match token_service::issue(&keys, &user.external_id, user.role, &user.email) {
        Ok(token) => {
            log::info!("✅ User registered successfully: {}", user.email);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "User registered successfully",
                "token": token
            }))
        }
        Err(e) => {
            log::error!("❌ Token generation failed: {:?}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, role and token returned"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    keys: web::Data<JwtKeys>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /login - email: {}", request.email);

    let user = match auth_service::verify_credentials(&db, &request).await {
        Ok(user) => user,
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            return e.to_response();
        }
    };

    match token_service::issue(&keys, &user.external_id, user.role, &user.email) {
        Ok(token) => {
            log::info!("✅ Login successful: {}", user.email);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Login successful",
                "role": user.role,
                "token": token
            }))
        }
        Err(e) => {
            log::error!("❌ Token generation failed: {:?}", e);
            e.to_response()
        }
    }
}

/// Runs behind the auth gate; the middleware has already verified the token
/// and stashed the claims in the request extensions.
pub async fn current_user(req: HttpRequest) -> HttpResponse {
    match req.extensions().get::<Claims>().cloned() {
        Some(claims) => HttpResponse::Ok().json(serde_json::json!({
            "id": claims.sub,
            "email": claims.email,
            "role": claims.role,
        })),
        None => AppError::InvalidToken.to_response(),
    }
}
