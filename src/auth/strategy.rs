use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by access tokens issued by [`JwtStrategy`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Identity attached to a request once a strategy accepted its credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredentials,
    #[error("unsupported authorization scheme")]
    InvalidScheme,
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("token has expired")]
    Expired,
    #[error("token subject is empty")]
    EmptySubject,
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("token lifetime out of range")]
    LifetimeOutOfRange,
}

/// A named mechanism able to turn a raw credential into an [`AuthenticatedUser`].
///
/// Guards never inspect credentials themselves; they hand them to a strategy.
#[cfg_attr(test, mockall::automock)]
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// HS256 JSON Web Token strategy, registered under the name `"jwt"`.
#[derive(Clone)]
pub struct JwtStrategy {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_seconds: i64,
}

impl std::fmt::Debug for JwtStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // keys stay out of logs
        f.debug_struct("JwtStrategy")
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

impl JwtStrategy {
    pub const NAME: &'static str = "jwt";

    pub fn new(secret: &str, expiration_seconds: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiration_seconds,
        }
    }

    /// Signs a fresh access token for `user_id`, valid for the configured lifetime.
    pub fn issue_token(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let exp = now
            .checked_add(self.expiration_seconds)
            .filter(|exp| *exp > now)
            .and_then(|exp| usize::try_from(exp).ok())
            .ok_or(AuthError::LifetimeOutOfRange)?;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now as usize,
            exp,
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(AuthError::Signing)
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e),
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::EmptySubject);
        }

        Ok(data.claims)
    }
}

impl AuthStrategy for JwtStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.decode_claims(token).map(AuthenticatedUser::from)
    }
}

/// Extracts the credential from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let header_value = header_value.trim();
    let Some((scheme, token)) = header_value.split_once(' ') else {
        // "Bearer" with nothing after it
        return Err(if header_value.eq_ignore_ascii_case("bearer") {
            AuthError::MissingCredentials
        } else {
            AuthError::InvalidScheme
        });
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(token)
}
