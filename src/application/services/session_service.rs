//! Session token issuance, validation, and invalidation.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::Account;
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime: 7 days.
const SESSION_TTL_SECS: i64 = 604_800;

/// Claims embedded in a session token.
///
/// `pwd_rot` freezes `password_changed_at` at issue time; the store-checked
/// validation path compares `iat` against the account's current rotation
/// timestamp, so a password change kills every previously issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub username: String,
    pub admin: bool,
    pub pwd_rot: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Result of an authorization check.
///
/// An explicit discriminated outcome instead of an error: the transport
/// layer maps `AuthRequired` to a login redirect (or 401) and `Forbidden`
/// to a 403 status.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthCheck {
    Authorized(SessionClaims),
    AuthRequired,
    Forbidden,
}

/// Service issuing and validating signed session tokens.
///
/// Tokens are HS256-signed JWTs carried opaque-to-client in the `session`
/// cookie (`HttpOnly; Secure; SameSite=Lax; Max-Age=604800`). Validation
/// is fail-closed: any parse, signature, or expiry problem yields no
/// session rather than an error.
pub struct SessionService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionService {
    /// Creates a session service keyed by the signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Issues a session cookie for an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, account: &Account) -> Result<Cookie<'static>, AppError> {
        let now = Utc::now().timestamp();

        let claims = SessionClaims {
            sub: account.id,
            username: account.username.clone(),
            admin: account.is_admin,
            pwd_rot: account.password_changed_at.timestamp(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| {
                tracing::error!(error = %e, "failed to sign session token");
                AppError::internal("Failed to create session", json!({}))
            })?;

        Ok(session_cookie(token, time::Duration::seconds(SESSION_TTL_SECS)))
    }

    /// Parses and verifies a raw token value.
    ///
    /// Returns `None` on any signature, structure, or expiry failure.
    pub fn validate(&self, token: &str) -> Option<SessionClaims> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .ok()
    }

    /// Returns a cookie that clears the session on the client.
    pub fn invalidate(&self) -> Cookie<'static> {
        session_cookie(String::new(), time::Duration::ZERO)
    }

    /// Authorizes a request against the live account store.
    ///
    /// The token alone is not trusted: the account must still exist and the
    /// token must have been issued at or after the account's current
    /// `password_changed_at`. Returned claims are re-derived from the live
    /// row, so a privilege change is visible immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only for store failures; absent or
    /// invalid sessions are an [`AuthCheck::AuthRequired`] outcome, never
    /// an error.
    pub async fn require_authenticated(
        &self,
        jar: &CookieJar,
        accounts: &dyn AccountRepository,
    ) -> Result<AuthCheck, AppError> {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(AuthCheck::AuthRequired);
        };

        let Some(claims) = self.validate(cookie.value()) else {
            return Ok(AuthCheck::AuthRequired);
        };

        let Some(account) = accounts.find_by_id(claims.sub).await? else {
            return Ok(AuthCheck::AuthRequired);
        };

        // Token predates the most recent password rotation.
        if claims.iat < account.password_changed_at.timestamp() {
            return Ok(AuthCheck::AuthRequired);
        }

        Ok(AuthCheck::Authorized(SessionClaims {
            username: account.username.clone(),
            admin: account.is_admin,
            pwd_rot: account.password_changed_at.timestamp(),
            ..claims
        }))
    }

    /// Authorizes a request and additionally requires admin privilege.
    pub async fn require_admin(
        &self,
        jar: &CookieJar,
        accounts: &dyn AccountRepository,
    ) -> Result<AuthCheck, AppError> {
        match self.require_authenticated(jar, accounts).await? {
            AuthCheck::Authorized(claims) if claims.admin => Ok(AuthCheck::Authorized(claims)),
            AuthCheck::Authorized(_) => Ok(AuthCheck::Forbidden),
            other => Ok(other),
        }
    }
}

/// Builds the session cookie with its wire attributes.
fn session_cookie(value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .build()
}
