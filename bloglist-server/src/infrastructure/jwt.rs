use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("token invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) exp: i64,
}

pub(crate) struct JwtService {
    pub(crate) secret: String,
    pub(crate) ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn generate_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        let exp = (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp();

        let claims = Claims {
            user_id,
            username: username.into(),
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Invalid(err),
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

    use super::{Claims, JwtError, JwtService};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn generated_token_round_trips() {
        let jwt = JwtService::new(SECRET, 3600);
        let token = jwt.generate_token(7, "root").expect("token must encode");

        let claims = jwt.verify_token(&token).expect("token must verify");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "root");
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = JwtService::new(SECRET, 3600);
        let claims = Claims {
            user_id: 7,
            username: "root".to_string(),
            exp: (Utc::now().timestamp()) - 120,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token must encode");

        let err = jwt.verify_token(&token).expect_err("token must be expired");
        assert!(matches!(err, JwtError::Expired));
    }

    #[test]
    fn tampered_token_is_reported_as_invalid() {
        let jwt = JwtService::new(SECRET, 3600);
        let other = JwtService::new("ffffffffffffffffffffffffffffffff", 3600);
        let token = other.generate_token(7, "root").expect("token must encode");

        let err = jwt.verify_token(&token).expect_err("token must be invalid");
        assert!(matches!(err, JwtError::Invalid(_)));
    }

    #[test]
    fn garbage_token_is_reported_as_invalid() {
        let jwt = JwtService::new(SECRET, 3600);
        let err = jwt
            .verify_token("not-a-token")
            .expect_err("token must be invalid");
        assert!(matches!(err, JwtError::Invalid(_)));
    }

    #[test]
    fn non_positive_ttl_falls_back_to_default() {
        let jwt = JwtService::new(SECRET, 0);
        assert_eq!(jwt.ttl_seconds, JwtService::DEFAULT_TTL_SECONDS);
    }
}
