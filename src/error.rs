use thiserror::Error;

/// Domain errors produced by the services.
///
/// The `Display` text of each variant is the message clients see in the
/// GraphQL `errors` array.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("id is invalid")]
    InvalidId,

    #[error("invalid token")]
    InvalidToken,

    #[error("login failed, invalid email or password")]
    AuthenticationFailure,

    #[error("access denied")]
    AccessDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("password hashing failed")]
    HashingFailure,

    #[error("token signing failed")]
    SigningFailure,

    #[error("create {0} failed")]
    CreateFailure(&'static str),

    #[error("update blog failed")]
    UpdateFailure,

    #[error("cannot connect to the database: {0}")]
    ConnectionFailure(String),

    #[error("database error")]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
