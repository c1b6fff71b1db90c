//! Credential primitives: password hashing and signed access tokens.

mod password;
mod token;

pub use password::Argon2PasswordHasher;
pub use token::JwtTokenService;
