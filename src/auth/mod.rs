pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::JwtKeys;
pub use middleware::{authenticate, AuthUser, MaybeAuthUser};
