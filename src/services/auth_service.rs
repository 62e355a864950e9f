use crate::{
    database::MongoDB,
    models::{Role, User, UserInfo},
    utils::error::{is_duplicate_key, AppError},
};
use bcrypt::{hash, verify, DEFAULT_COST};
use mongodb::bson::doc;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub id: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Creates a user record. The role comes from the external id prefix and the
/// password is stored as a bcrypt hash; an email or external-id collision
/// surfaces as `DuplicateKey` via the unique indexes.
pub async fn register_user(db: &MongoDB, request: &RegisterRequest) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    let role = Role::from_external_id(&request.id);
    let hashed_password = hash(&request.password, DEFAULT_COST)?;

    let new_user = User {
        _id: None,
        email: request.email.clone(),
        password: hashed_password,
        external_id: request.id.clone(),
        role,
    };

    collection
        .insert_one(&new_user)
        .await
        .map_err(|e| AppError::insert("User", e))?;

    Ok(new_user)
}

/// Looks up the account and compares the password against the stored hash.
/// Unknown email and wrong password both collapse to `InvalidCredentials`;
/// the caller never learns which check failed.
pub async fn verify_credentials(db: &MongoDB, request: &LoginRequest) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(AppError::store)?
        .ok_or(AppError::InvalidCredentials)?;

    let valid = verify(&request.password, &user.password)?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

/// Idempotent account provisioning for the registration workflow: reuses the
/// account registered under `email` when there is one, otherwise creates a
/// student account with a random placeholder password. The holder has to go
/// through a real registration to pick a usable credential.
pub async fn ensure_default_user(
    db: &MongoDB,
    email: &str,
    external_id: &str,
) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    if let Some(user) = collection
        .find_one(doc! { "email": email })
        .await
        .map_err(AppError::store)?
    {
        return Ok(user);
    }

    let placeholder = Uuid::new_v4().to_string();
    let new_user = User {
        _id: None,
        email: email.to_string(),
        password: hash(&placeholder, DEFAULT_COST)?,
        external_id: external_id.to_string(),
        role: Role::Student,
    };

    match collection.insert_one(&new_user).await {
        Ok(_) => Ok(new_user),
        // A concurrent registration can create the account between the
        // lookup and the insert; the record already in the store wins.
        Err(e) if is_duplicate_key(&e) => collection
            .find_one(doc! { "email": email })
            .await
            .map_err(AppError::store)?
            .ok_or_else(|| AppError::NotFound("User".to_string())),
        Err(e) => Err(AppError::store(e)),
    }
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    let collection = db.collection::<User>("users");

    collection
        .find_one(doc! { "email": email })
        .await
        .map_err(AppError::store)
}

/// Every user with role `student`, as public projections.
pub async fn list_students(db: &MongoDB) -> Result<Vec<UserInfo>, AppError> {
    let collection = db.collection::<User>("users");

    let mut cursor = collection
        .find(doc! { "role": "student" })
        .await
        .map_err(AppError::store)?;

    let mut students = Vec::new();
    use futures::stream::StreamExt;

    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => students.push(UserInfo::from(user)),
            Err(e) => log::error!("Error reading user: {}", e),
        }
    }

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_verify_matches_only_original_password() {
        let hashed = hash("pw", DEFAULT_COST).unwrap();
        assert!(verify("pw", &hashed).unwrap());
        assert!(!verify("wrong", &hashed).unwrap());
    }

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/CourseServiceTest".to_string());
        MongoDB::new(&uri).await.expect("test database")
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_register_then_login_round_trip() {
        let db = test_db().await;
        let suffix = Uuid::new_v4().simple().to_string();

        let register = RegisterRequest {
            email: format!("a-{}@x.com", suffix),
            password: "pw".to_string(),
            id: format!("T{}", suffix),
        };
        let user = register_user(&db, &register).await.unwrap();
        assert_eq!(user.role, Role::Teacher);

        let login = LoginRequest {
            email: register.email.clone(),
            password: "pw".to_string(),
        };
        let logged_in = verify_credentials(&db, &login).await.unwrap();
        assert_eq!(logged_in.role, Role::Teacher);
        assert_eq!(logged_in.external_id, register.id);

        let bad = LoginRequest {
            email: register.email,
            password: "wrong".to_string(),
        };
        assert!(matches!(
            verify_credentials(&db, &bad).await,
            Err(AppError::InvalidCredentials)
        ));

        // Unknown email reports the same error kind as a wrong password.
        let unknown = LoginRequest {
            email: format!("nobody-{}@x.com", suffix),
            password: "pw".to_string(),
        };
        assert!(matches!(
            verify_credentials(&db, &unknown).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_email_fails_second_registration() {
        let db = test_db().await;
        let suffix = Uuid::new_v4().simple().to_string();

        let first = RegisterRequest {
            email: format!("dup-{}@x.com", suffix),
            password: "pw".to_string(),
            id: format!("S1{}", suffix),
        };
        register_user(&db, &first).await.unwrap();

        let second = RegisterRequest {
            email: first.email.clone(),
            password: "pw".to_string(),
            id: format!("S2{}", suffix),
        };
        assert!(matches!(
            register_user(&db, &second).await,
            Err(AppError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_external_id_fails_second_registration() {
        let db = test_db().await;
        let suffix = Uuid::new_v4().simple().to_string();
        let external_id = format!("S{}", suffix);

        let first = RegisterRequest {
            email: format!("one-{}@x.com", suffix),
            password: "pw".to_string(),
            id: external_id.clone(),
        };
        register_user(&db, &first).await.unwrap();

        let second = RegisterRequest {
            email: format!("two-{}@x.com", suffix),
            password: "pw".to_string(),
            id: external_id,
        };
        assert!(matches!(
            register_user(&db, &second).await,
            Err(AppError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_ensure_default_user_is_idempotent() {
        let db = test_db().await;
        let suffix = Uuid::new_v4().simple().to_string();
        let email = format!("jo-{}@x.com", suffix);
        let external_id = format!("S{}", suffix);

        let first = ensure_default_user(&db, &email, &external_id).await.unwrap();
        let second = ensure_default_user(&db, &email, &external_id).await.unwrap();

        assert_eq!(first.external_id, second.external_id);
        assert_eq!(first.role, Role::Student);

        let count = db
            .collection::<User>("users")
            .count_documents(doc! { "email": &email })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
