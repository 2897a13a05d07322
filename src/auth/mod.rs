pub mod password;
pub mod session;
pub mod token;

pub use password::{check_credentials, hash_password};
pub use token::{issue_session, verify_session, SessionClaims};
