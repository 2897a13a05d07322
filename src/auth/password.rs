use bcrypt::{hash, verify, DEFAULT_COST};

use crate::config::User;
use crate::error::{AppError, Result};

/// bcrypt hash for an `auth.users[].password_hash` entry.
pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Internal(format!("bcrypt failed: {}", e)))
}

/// The configured user matching both `username` and `password`, if any.
pub fn check_credentials<'a>(
    users: &'a [User],
    username: &str,
    password: &str,
) -> Result<Option<&'a User>> {
    let Some(user) = users.iter().find(|u| u.username == username) else {
        return Ok(None);
    };

    let matches = verify(password, &user.password_hash).map_err(|e| {
        AppError::Config(format!(
            "password_hash for user '{}' is not a bcrypt hash: {}",
            user.username, e
        ))
    })?;

    Ok(matches.then_some(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, password: &str) -> User {
        User {
            username: username.into(),
            password_hash: hash(password, 4).unwrap(),
        }
    }

    #[test]
    fn test_check_credentials() {
        let users = vec![user("admin", "wardrive"), user("viewer", "look")];

        let found = check_credentials(&users, "viewer", "look").unwrap();
        assert_eq!(found.map(|u| u.username.as_str()), Some("viewer"));

        assert!(check_credentials(&users, "admin", "look").unwrap().is_none());
        assert!(check_credentials(&users, "nobody", "wardrive").unwrap().is_none());
    }

    #[test]
    fn test_broken_hash_is_a_config_error() {
        let users = vec![User {
            username: "admin".into(),
            password_hash: "plaintext".into(),
        }];
        let err = check_credentials(&users, "admin", "plaintext").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_hash_password_is_verifiable() {
        let hashed = hash_password("wardrive").unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify("wardrive", &hashed).unwrap());
    }
}
