use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error};

use crate::{
    config::JwtConfig,
    error::{ServiceError, ServiceResult},
    state::AppState,
};

/// JWT payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String, // hex ObjectId of the user
    pub exp: i64,        // expires at (unix timestamp)
    pub iat: i64,        // issued at (unix timestamp)
}

/// Identity recovered from a token whose signature checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaim {
    pub user_id: String,
    pub expires: i64,
}

impl SessionClaim {
    /// A claim expiring exactly at `now` is still valid.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc().unix_timestamp())
    }
}

/// HS256 signing and verification keys with the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDuration,
    has_secret: bool,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: TimeDuration::minutes(config.ttl_minutes),
            has_secret: !config.secret.is_empty(),
        }
    }

    pub fn issue(&self, user_id: &str) -> ServiceResult<String> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, user_id: &str, now: OffsetDateTime) -> ServiceResult<String> {
        if !self.has_secret {
            error!("jwt secret is not configured");
            return Err(ServiceError::SigningFailure);
        }
        let claims = Claims {
            user_id: user_id.to_string(),
            exp: (now + self.ttl).unix_timestamp(),
            iat: now.unix_timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            error!(error = %e, "jwt encode failed");
            ServiceError::SigningFailure
        })?;
        debug!(user_id = %user_id, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    /// Checks signature and shape only. Expiry is left to the caller, see
    /// [`SessionClaim::is_expired`].
    pub fn verify(&self, token: &str) -> ServiceResult<SessionClaim> {
        if token.is_empty() || !self.has_secret {
            return Err(ServiceError::InvalidToken);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "jwt rejected");
            ServiceError::InvalidToken
        })?;
        debug!(user_id = %data.claims.user_id, "jwt verified");
        Ok(SessionClaim {
            user_id: data.claims.user_id,
            expires: data.claims.exp,
        })
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
///
/// Returns `""` when the header is absent, uses another scheme, or carries
/// no token; [`JwtKeys::verify`] rejects that sentinel.
pub fn extract_bearer(header: Option<&str>) -> &str {
    let Some(header) = header else {
        return "";
    };
    let mut parts = header.split(' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) => token,
        _ => "",
    }
}
