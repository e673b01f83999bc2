use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let name = normalize_name(&self.name)?;
        let password_len = self.password.chars().count();
        if password_len < 3 || password_len > 128 {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 3..128 chars",
            });
        }
        Ok(Self {
            username,
            name,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;
        let name = normalize_name(&name.into())?;

        Ok(Self {
            id,
            username,
            name,
            created_at,
        })
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.len() < 3 || username.len() > 64 {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    Ok(username.to_string())
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.len() > 128 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..128 chars",
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{LoginRequest, RegisterRequest, User, normalize_username};

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "valid_user", "Valid User", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn username_rules_are_applied() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("valid_user").is_ok());
        assert_eq!(
            normalize_username("  valid_user  ").expect("must be valid"),
            "valid_user"
        );
    }

    #[test]
    fn register_password_length_is_checked() {
        let too_short = RegisterRequest {
            username: "valid_user".to_string(),
            name: "Valid User".to_string(),
            password: "ab".to_string(),
        };
        assert!(too_short.validate().is_err());

        let minimal = RegisterRequest {
            username: "valid_user".to_string(),
            name: "Valid User".to_string(),
            password: "abc".to_string(),
        };
        assert!(minimal.validate().is_ok());
    }

    #[test]
    fn register_requires_display_name() {
        let req = RegisterRequest {
            username: "valid_user".to_string(),
            name: "   ".to_string(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn login_requires_username_and_password() {
        let empty_username = LoginRequest {
            username: "  ".to_string(),
            password: "secret".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = LoginRequest {
            username: "root".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }
}
