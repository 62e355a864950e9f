use actix_web::{http::StatusCode, HttpResponse};
use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt;

/// Application error kinds, mapped to stable client-facing messages.
/// Store-level details stay in the logs (`Debug`), never in responses.
#[derive(Debug)]
pub enum AppError {
    DuplicateKey(String),
    NotFound(String),
    InvalidCredentials,
    InvalidToken,
    ExpiredToken,
    MissingField(String),
    StoreUnavailable(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateKey(entity) => write!(f, "{} already exists", entity),
            AppError::NotFound(entity) => write!(f, "{} not found", entity),
            AppError::InvalidCredentials => write!(f, "Invalid email or password"),
            AppError::InvalidToken => write!(f, "Invalid token"),
            AppError::ExpiredToken => write!(f, "Token expired"),
            AppError::MissingField(msg) => write!(f, "{}", msg),
            AppError::StoreUnavailable(_) => write!(f, "Database error"),
            AppError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Builds the JSON error response. Every failure body carries a `message`
    /// field, matching what the frontend surfaces.
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }

    /// Wraps a store error from a read/update path.
    pub fn store(err: mongodb::error::Error) -> AppError {
        AppError::StoreUnavailable(err.to_string())
    }

    /// Wraps a store error from an insert path, surfacing unique-index
    /// violations as `DuplicateKey` for the named entity.
    pub fn insert(entity: &str, err: mongodb::error::Error) -> AppError {
        if is_duplicate_key(&err) {
            AppError::DuplicateKey(entity.to_string())
        } else {
            AppError::store(err)
        }
    }
}

/// MongoDB reports unique-index violations as write error code 11000.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == 11000,
        ErrorKind::Command(command_err) => command_err.code == 11000,
        _ => false,
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("bcrypt failure: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::DuplicateKey("User".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound("Course".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::MissingField("week is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::StoreUnavailable("connection refused".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_do_not_leak_store_details() {
        let err = AppError::StoreUnavailable("mongodb://secret-host timed out".into());
        assert_eq!(err.to_string(), "Database error");

        let err = AppError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_jwt_error_conversion() {
        let expired: jsonwebtoken::errors::Error =
            jsonwebtoken::errors::ErrorKind::ExpiredSignature.into();
        assert!(matches!(AppError::from(expired), AppError::ExpiredToken));

        let invalid: jsonwebtoken::errors::Error =
            jsonwebtoken::errors::ErrorKind::InvalidSignature.into();
        assert!(matches!(AppError::from(invalid), AppError::InvalidToken));
    }
}
