use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    db::parse_object_id,
    error::{ServiceError, ServiceResult},
    users::{model::User, repo::UserRepo},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

// Verified against on unknown emails so every failed login runs argon2 once.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$6ZOvbm6ViCCzt/mmE/yoQnH9dZb4/4WtaNGeB1aSiUA";

/// Registration, login and user lookup.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepo>,
    keys: JwtKeys,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepo>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    /// Creates the user and returns a token for it.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<String> {
        if username.trim().is_empty() {
            warn!("empty username");
            return Err(ServiceError::Validation("username is required"));
        }
        if !is_valid_email(email) {
            warn!(email = %email, "invalid email");
            return Err(ServiceError::Validation("email is invalid"));
        }
        if password.is_empty() {
            warn!("empty password");
            return Err(ServiceError::Validation("password is required"));
        }

        let hash = hash_password(password)?;
        let user = User::new(username, email, hash);
        let user_id = self.repo.insert(&user).await.map_err(|e| {
            error!(error = %e, "create user failed");
            ServiceError::CreateFailure("user")
        })?;

        let token = self.keys.issue(&user_id.to_hex())?;
        info!(user_id = %user_id, email = %email, "user registered");
        Ok(token)
    }

    /// Every failure reads the same to the caller, whatever the cause.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<String> {
        let user = match self.repo.find_by_email(email).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                let _ = verify_password(password, DUMMY_HASH);
                warn!(email = %email, "login unknown email");
                return Err(ServiceError::AuthenticationFailure);
            }
            Err(e) => {
                let _ = verify_password(password, DUMMY_HASH);
                error!(error = %e, "find_by_email failed");
                return Err(ServiceError::AuthenticationFailure);
            }
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                warn!(email = %email, user_id = %user.id, "login invalid password");
                return Err(ServiceError::AuthenticationFailure);
            }
            Err(_) => {
                error!(user_id = %user.id, "stored password hash is unreadable");
                return Err(ServiceError::AuthenticationFailure);
            }
        }

        let token = self.keys.issue(&user.id.to_hex())?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(token)
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: &str) -> ServiceResult<User> {
        let user_id = parse_object_id(id)?;
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::JwtConfig, memory::MemoryUserRepo};

    fn make_keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "test".into(),
            ttl_minutes: 5,
        })
    }

    fn make_service() -> UserService {
        UserService::new(Arc::new(MemoryUserRepo::new()), make_keys())
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("test@test.com"));
        assert!(!is_valid_email("test@test"));
        assert!(!is_valid_email("no at sign.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = make_service();
        let token = svc
            .register("test", "test@test.com", "123123")
            .await
            .expect("register");
        assert!(!token.is_empty());

        let claim = make_keys().verify(&token).expect("token verifies");
        let user = svc.get_user_by_id(&claim.user_id).await.expect("user exists");
        assert_eq!(user.username, "test");
        assert_ne!(user.password_hash, "123123");

        let login = svc.login("test@test.com", "123123").await.expect("login");
        assert_eq!(
            make_keys().verify(&login).expect("verify").user_id,
            claim.user_id
        );
    }

    #[tokio::test]
    async fn login_matches_email_exactly() {
        let svc = make_service();
        svc.register("ada", "Ada@Example.com", "123123")
            .await
            .expect("register");
        svc.login("Ada@Example.com", "123123").await.expect("login");
        assert!(matches!(
            svc.login("ada@example.com", "123123").await,
            Err(ServiceError::AuthenticationFailure)
        ));
    }

    #[test]
    fn dummy_hash_is_a_readable_phc_string() {
        assert!(!verify_password("123123", DUMMY_HASH).expect("parses"));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = make_service();
        svc.register("test", "test@test.com", "123123")
            .await
            .expect("register");

        let wrong_password = svc.login("test@test.com", "nope").await.unwrap_err();
        let unknown_email = svc.login("wrong@mail.com", "123123").await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(
            wrong_password.to_string(),
            "login failed, invalid email or password"
        );
    }

    #[tokio::test]
    async fn register_validates_input() {
        let svc = make_service();
        assert!(matches!(
            svc.register("", "a@b.co", "pw").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.register("a", "not-an-email", "pw").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.register("a", "a@b.co", "").await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn register_twice_with_one_email_issues_two_tokens() {
        let svc = make_service();
        let first = svc.register("a", "a@b.co", "pw").await.expect("first");
        let second = svc.register("b", "a@b.co", "pw").await.expect("second");
        let first_id = make_keys().verify(&first).expect("verify").user_id;
        let second_id = make_keys().verify(&second).expect("verify").user_id;
        assert_ne!(first_id, second_id);
    }

    #[tokio::test]
    async fn register_without_secret_is_a_signing_failure() {
        let keys = JwtKeys::new(&JwtConfig {
            secret: String::new(),
            ttl_minutes: 5,
        });
        let svc = UserService::new(Arc::new(MemoryUserRepo::new()), keys);
        let err = svc.register("a", "a@b.co", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::SigningFailure));
    }

    #[tokio::test]
    async fn get_user_by_id_rejects_bad_and_unknown_ids() {
        let svc = make_service();
        assert!(matches!(
            svc.get_user_by_id("xyz").await,
            Err(ServiceError::InvalidId)
        ));
        let err = svc
            .get_user_by_id("62c24f3b4896bb25c21e49b9")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "user not found");
    }
}
