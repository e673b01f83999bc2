use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository, UserWithBlogs};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::{JwtError, JwtService};

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let password_hash = self.hash_password(&req.password)?;

        let new_user = NewUser {
            username: req.username,
            name: req.name,
            password_hash,
        };
        self.repo.create_user(new_user).await
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_username(&req.username).await? {
            Some(user_creds) => user_creds,
            None => {
                // Equalize timing with the found-user path so a missing
                // username is indistinguishable from a wrong password.
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user_creds.password_hash)?;

        let token = self
            .jwt
            .generate_token(user_creds.user.id, &user_creds.user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult {
            user: user_creds.user,
            token,
        })
    }

    /// Resolves a bearer token to its account: verifies signature and
    /// expiry, decodes the subject id, loads the account record.
    pub(crate) async fn resolve_token(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.jwt.verify_token(token).map_err(|err| match err {
            JwtError::Expired => DomainError::TokenExpired,
            _ => DomainError::InvalidToken,
        })?;

        if claims.user_id <= 0 {
            return Err(DomainError::InvalidToken);
        }

        self.repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or(DomainError::InvalidToken)
    }

    pub(crate) async fn list_users(&self) -> Result<Vec<UserWithBlogs>, DomainError> {
        self.repo.list_users().await
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
