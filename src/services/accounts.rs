use crate::domain::{PublicUser, Signup};
use crate::error::{GuideError, Result};
use crate::storage::Storage;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Default, Deserialize)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub struct AccountService {
    storage: Arc<dyn Storage>,
}

impl AccountService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn signup(&self, input: SignupInput) -> Result<PublicUser> {
        let name = input.name.as_deref().map(str::trim).unwrap_or_default();
        let email = input.email.as_deref().map(normalize_email).unwrap_or_default();
        let password = input.password.unwrap_or_default();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(GuideError::InputMissing(
                "Name, email and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(GuideError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let mut signup = Signup {
            id: None,
            name: name.to_string(),
            password_digest: password_digest(&salt, &password),
            password_salt: salt,
            email,
            created_at: Utc::now(),
        };
        self.storage.create_signup(&mut signup).await?;
        info!("New signup {}", signup.email);
        Ok(PublicUser::from(&signup))
    }

    pub async fn login(&self, input: LoginInput) -> Result<PublicUser> {
        let (Some(email), Some(password)) = (input.email, input.password) else {
            return Err(GuideError::InputMissing(
                "Email and password are required".to_string(),
            ));
        };
        let email = normalize_email(&email);

        let invalid = || GuideError::Unauthorized("Invalid email or password".to_string());
        let signup = self
            .storage
            .get_signup_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if password_digest(&signup.password_salt, &password) != signup.password_digest {
            warn!("Failed login for {}", email);
            return Err(invalid());
        }
        Ok(PublicUser::from(&signup))
    }

    /// Every account, newest first.
    pub async fn list(&self) -> Result<Vec<PublicUser>> {
        let mut signups = self.storage.get_all_signups().await?;
        signups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(signups.iter().map(PublicUser::from).collect())
    }

    pub async fn get(&self, signup_id: Uuid) -> Result<PublicUser> {
        self.storage
            .get_signup_by_id(signup_id)
            .await?
            .map(|signup| PublicUser::from(&signup))
            .ok_or_else(|| GuideError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn signup_input(email: &str, password: &str) -> SignupInput {
        SignupInput {
            name: Some("Mira".to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let service = AccountService::new(Arc::new(InMemoryStorage::new()));
        let user = service
            .signup(signup_input("  Mira@Example.com ", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.email, "mira@example.com");

        let logged_in = service
            .login(LoginInput {
                email: Some("MIRA@example.com".to_string()),
                password: Some("secret1".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);

        let err = service
            .login(LoginInput {
                email: Some("mira@example.com".to_string()),
                password: Some("wrong-one".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GuideError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_signup_rules() {
        let storage = Arc::new(InMemoryStorage::new());
        let service = AccountService::new(storage.clone());

        let err = service.signup(signup_input("a@b.c", "12345")).await.unwrap_err();
        assert!(matches!(err, GuideError::Validation(_)));

        service.signup(signup_input("a@b.c", "123456")).await.unwrap();
        let err = service.signup(signup_input("A@B.C", "abcdef")).await.unwrap_err();
        assert!(matches!(err, GuideError::Conflict(_)));

        let stored = storage.get_signup_by_email("a@b.c").await.unwrap().unwrap();
        assert_ne!(stored.password_digest, "123456");
        assert_eq!(stored.password_digest.len(), 64);
    }
}
