//! Handlers for account signup, signin, token refresh, logout, and `/me`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use sqlx::error::ErrorKind;
use stagehand_core::error::CoreError;
use stagehand_core::types::DbId;
use stagehand_core::user;
use stagehand_db::models::user::{CreateUser, UserResponse};
use stagehand_db::repositories::UserRepo;

use crate::auth::cookies::{set_token_cookies, unset_token_cookies};
use crate::auth::jwt::{generate_token, TokenKind};
use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::error::{AppError, AppResult, AuthError};
use crate::extract::ValidJson;
use crate::middleware::auth::{AuthUser, RefreshUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /signup`. Missing fields read as empty and fail
/// validation; a body that does not parse at all is also a signup error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /signin`.
///
/// Older clients post the plaintext password under `password_hash`; it is
/// accepted as an alias and treated as plaintext.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "password_hash")]
    pub password: String,
}

/// `{ "user": ... }` envelope returned by signup, signin, and refresh.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/signup
///
/// Create an account and start a session. Returns 201 with the new user and
/// sets access and refresh cookies.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<(StatusCode, CookieJar, Json<UserEnvelope>)> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected signup body");
        AuthError::SignupRejected(
            "Signup requires username, email and password as strings".into(),
        )
    })?;
    validate_signup(&input)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let new_user = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
    };
    let user = match UserRepo::create(&state.pool, &new_user).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.kind() == ErrorKind::UniqueViolation => {
            return Err(AuthError::SignupRejected(
                "Username or email is already registered".into(),
            )
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    let jar = start_session(jar, &state, user.id)?;
    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(UserEnvelope {
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/signin
///
/// Authenticate with email + password. An unknown email and a wrong password
/// produce the same 401 so account existence is not revealed.
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(input): ValidJson<SigninRequest>,
) -> AppResult<(CookieJar, Json<UserEnvelope>)> {
    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        verify_against_dummy(&input.password);
        tracing::info!("Rejected sign-in for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected sign-in with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let jar = start_session(jar, &state, user.id)?;
    tracing::info!(user_id = user.id, "User signed in");

    Ok((
        jar,
        Json(UserEnvelope {
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/refresh_token
///
/// Exchange a valid refresh token for a new access token cookie.
pub async fn refresh(
    State(state): State<AppState>,
    refresh_user: RefreshUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<UserEnvelope>)> {
    let user = UserRepo::find_by_id(&state.pool, refresh_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let access = generate_token(user.id, TokenKind::Access, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let jar = set_token_cookies(jar, TokenKind::Access, &access, &state.config.jwt);
    tracing::debug!(user_id = user.id, "Access token refreshed");

    Ok((
        jar,
        Json(UserEnvelope {
            user: UserResponse::from(&user),
        }),
    ))
}

/// DELETE /api/v1/logout
///
/// Clear the token cookies. Tokens already handed out stay valid until they
/// expire; there is no server-side revocation.
pub async fn logout(jar: CookieJar) -> (StatusCode, CookieJar) {
    (StatusCode::NO_CONTENT, unset_token_cookies(jar))
}

/// GET /api/v1/me
///
/// Return the user identified by the access token.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_signup(input: &SignupRequest) -> Result<(), AuthError> {
    user::validate_username(&input.username)
        .and_then(|()| user::validate_email(&input.email))
        .and_then(|()| user::validate_password(&input.password))
        .map_err(|err| match err {
            CoreError::Validation(msg) => AuthError::SignupRejected(msg),
            other => AuthError::SignupRejected(other.to_string()),
        })
}

/// Issue access + refresh tokens and add their cookies to `jar`.
fn start_session(jar: CookieJar, state: &AppState, user_id: DbId) -> AppResult<CookieJar> {
    let jwt = &state.config.jwt;

    let access = generate_token(user_id, TokenKind::Access, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = generate_token(user_id, TokenKind::Refresh, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let jar = set_token_cookies(jar, TokenKind::Access, &access, jwt);
    Ok(set_token_cookies(jar, TokenKind::Refresh, &refresh, jwt))
}
