//! Authentication module: password hashing, session tokens, request gate

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use credentials::{extract_token, CredentialSource, SESSION_COOKIE_NAME};
pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{optional_auth, require_auth, AuthContext, MaybeAuth};
pub use password::PasswordHasher;
