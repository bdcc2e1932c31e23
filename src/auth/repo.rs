use sqlx::PgPool;
use tracing::warn;

use crate::auth::password::verify_password;
use crate::auth::repo_types::User;
use crate::error::ApiError;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by username.
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with an already-hashed password. Both uniqueness
    /// constraints are checked up front; a racing insert caught by the
    /// database constraint maps to the same `Conflict`.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, ApiError> {
        if User::find_by_email(db, email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        if User::find_by_username(db, username).await?.is_some() {
            return Err(ApiError::Conflict("Username already taken".into()));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(d) if d.is_unique_violation() => {
                ApiError::Conflict("Username or email already registered".into())
            }
            _ => ApiError::from(e),
        })?;
        Ok(user)
    }

    /// Look up by email and check the password. Unknown email and wrong
    /// password both yield the identical `InvalidCredentials` error.
    /// Argon2 verification runs on the blocking pool.
    pub async fn authenticate(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let user = match User::find_by_email(db, email).await? {
            Some(u) => u,
            None => {
                warn!(email = %email, "login for unknown email");
                return Err(ApiError::InvalidCredentials);
            }
        };

        let hash = user.password_hash.clone();
        let password = password.to_string();
        let ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| ApiError::Internal(anyhow::Error::from(e)))??;

        if !ok {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(ApiError::InvalidCredentials);
        }
        Ok(user)
    }
}
