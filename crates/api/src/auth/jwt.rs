//! JWT access- and refresh-token generation and validation.
//!
//! Both token kinds are HS256-signed JWTs carrying a [`Claims`] payload. The
//! `type` claim keeps a refresh token from being accepted where an access
//! token is required and vice versa. Tokens are stateless: nothing is stored
//! server-side, so logout only clears the client's cookies.

use std::str::FromStr;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stagehand_core::types::DbId;
use uuid::Uuid;

use crate::config::{parse_or, ConfigError};

/// Which credential a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Where incoming requests may carry their token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLocation {
    /// `Authorization: Bearer <token>`.
    Headers,
    /// The `access_token_cookie` / `refresh_token_cookie` cookies.
    Cookies,
}

impl FromStr for TokenLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headers" => Ok(Self::Headers),
            "cookies" => Ok(Self::Cookies),
            other => Err(format!("unknown token location '{other}'")),
        }
    }
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Access or refresh.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    /// Double-submit CSRF value mirrored in a readable cookie.
    pub csrf: String,
}

/// A freshly signed token plus the values needed to set its cookies.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub csrf: String,
    /// Lifetime in seconds, used as the cookie `Max-Age`.
    pub max_age_secs: i64,
}

/// Reasons an incoming token is rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("expected {expected} token, got {found} token")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },
}

/// Configuration for JWT token generation, validation, and transport.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 5).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 30).
    pub refresh_token_expiry_days: i64,
    /// Locations searched for an incoming token, in order.
    pub token_locations: Vec<TokenLocation>,
    /// Mark token cookies `Secure` (default: false).
    pub cookie_secure: bool,
    /// Require `X-CSRF-TOKEN` on state-changing requests authenticated by cookie.
    pub csrf_protect: bool,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 5;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration through `lookup`.
    ///
    /// | Env Var                    | Required | Default           |
    /// |----------------------------|----------|-------------------|
    /// | `JWT_SECRET`               | **yes**  | --                |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `5`               |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `30`              |
    /// | `JWT_TOKEN_LOCATION`       | no       | `headers,cookies` |
    /// | `JWT_COOKIE_SECURE`        | no       | `false`           |
    /// | `JWT_COOKIE_CSRF_PROTECT`  | no       | `true`            |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry_mins =
            parse_or(lookup, "JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?;
        let refresh_token_expiry_days =
            parse_or(lookup, "JWT_REFRESH_EXPIRY_DAYS", DEFAULT_REFRESH_EXPIRY_DAYS)?;

        let raw_locations = lookup("JWT_TOKEN_LOCATION").unwrap_or_else(|| "headers,cookies".into());
        let token_locations = raw_locations
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.parse().map_err(|reason| ConfigError::Invalid {
                    key: "JWT_TOKEN_LOCATION",
                    value: raw_locations.clone(),
                    reason,
                })
            })
            .collect::<Result<Vec<TokenLocation>, _>>()?;
        if token_locations.is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_TOKEN_LOCATION",
                value: raw_locations,
                reason: "at least one location is required".into(),
            });
        }

        let cookie_secure = parse_or(lookup, "JWT_COOKIE_SECURE", false)?;
        let csrf_protect = parse_or(lookup, "JWT_COOKIE_CSRF_PROTECT", true)?;

        Ok(Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
            token_locations,
            cookie_secure,
            csrf_protect,
        })
    }

    /// Lifetime of a token of the given kind, in seconds.
    pub fn lifetime_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_token_expiry_mins * 60,
            TokenKind::Refresh => self.refresh_token_expiry_days * 24 * 60 * 60,
        }
    }
}

/// Sign a token of the given kind for `user_id`.
pub fn generate_token(
    user_id: DbId,
    kind: TokenKind,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let max_age_secs = config.lifetime_secs(kind);

    let claims = Claims {
        sub: user_id,
        kind,
        exp: now + max_age_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        csrf: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        token,
        csrf: claims.csrf,
        max_age_secs,
    })
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Checks the signature and expiration, then that the token is of the
/// `expected` kind.
pub fn validate_token(
    token: &str,
    expected: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    let claims = token_data.claims;
    if claims.kind != expected {
        return Err(TokenError::WrongKind {
            expected: expected.as_str(),
            found: claims.kind.as_str(),
        });
    }
    Ok(claims)
}
