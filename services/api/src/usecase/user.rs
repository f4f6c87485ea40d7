use anyhow::Context as _;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, validate_registration};
use crate::error::ApiError;

/// Hash a password with Argon2 default parameters and a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, ApiError> {
        // Surrounding whitespace must not yield a second account for the same address.
        let username = input.username.trim().to_owned();
        let email = input.email.trim().to_owned();
        validate_registration(&username, &email, &input.password)
            .map_err(ApiError::Validation)?;

        // Argon2 is deliberately slow; keep it off the async workers.
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .context("join password hashing task")??;

        let user = self
            .repo
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}
