use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service::{self, JwtKeys};

/// Authorization gate. Requests reach the wrapped service only with a
/// verified token; every other path short-circuits with a 401 before any
/// protected logic runs. Verified claims are attached to the request
/// extensions for handlers to read.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let keys = match req.app_data::<web::Data<JwtKeys>>() {
            Some(keys) => keys.clone(),
            None => {
                return Box::pin(async move {
                    Err(json_error(
                        HttpResponse::InternalServerError(),
                        "Internal server error",
                    ))
                })
            }
        };

        let header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let token = match header {
            Some(value) => {
                // The frontend sends the bare token; Bearer prefixes are
                // accepted too.
                value.strip_prefix("Bearer ").unwrap_or(value.as_str()).to_string()
            }
            None => {
                return Box::pin(async move {
                    Err(json_error(
                        HttpResponse::Unauthorized(),
                        "Authorization token missing",
                    ))
                })
            }
        };

        match token_service::verify(&keys, &token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            Err(e) => {
                log::warn!("❌ Token rejected: {}", e);
                let response = e.to_response();
                Box::pin(async move { Err(InternalError::from_response(e, response).into()) })
            }
        }
    }
}

fn json_error(mut builder: actix_web::HttpResponseBuilder, message: &str) -> Error {
    let response = builder.json(serde_json::json!({ "message": message }));
    InternalError::from_response(message.to_string(), response).into()
}
