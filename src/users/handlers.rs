use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UpdateRoleRequest,
            UpdateUserRequest,
        },
        repo::{NewUser, User},
        role::Role,
    },
    util,
};

fn parse_role(raw: Option<&str>) -> Result<Role, ApiError> {
    match raw {
        None => Ok(Role::Customer),
        Some(s) => s
            .parse::<Role>()
            .map_err(|_| ApiError::Validation(format!("Unknown role: {}", s))),
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if payload.userid.is_empty() || payload.password.is_empty() || payload.email.is_empty() {
        return Err(ApiError::Validation(
            "User ID, Password, and Email are required.".into(),
        ));
    }

    let role = parse_role(payload.role.as_deref())?;

    if User::exists(&state.db, &payload.userid, &payload.email).await? {
        warn!(userid = %payload.userid, "registration for existing userid or email");
        return Err(ApiError::DuplicateUser);
    }

    let new = NewUser {
        uid: util::generate_uid(),
        userid: payload.userid,
        password_hash: hash_password(&payload.password),
        full_name: payload.full_name,
        phone: payload.phone,
        address: payload.address,
        email: payload.email,
        role,
    };

    if let Err(e) = User::insert(&state.db, &new).await {
        // Two registrations can pass the existence check concurrently; the
        // unique constraints on userid/email turn the loser into a duplicate.
        if e.as_database_error()
            .map_or(false, |d| d.is_unique_violation())
        {
            warn!(userid = %new.userid, "duplicate registration lost insert race");
            return Err(ApiError::DuplicateUser);
        }
        return Err(e.into());
    }

    info!(userid = %new.userid, uid = %new.uid, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully.",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = User::find_by_userid(&state.db, &payload.userid)
        .await?
        .ok_or(ApiError::LoginUserNotFound)?;

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(userid = %user.userid, "login with incorrect password");
        return Err(ApiError::BadCredential);
    }

    // The role column is CHECK-constrained, so a parse failure here means
    // the store itself is inconsistent.
    let role = user
        .role
        .parse::<Role>()
        .map_err(|_| anyhow::anyhow!("stored role {:?} outside role set", user.role))?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.userid, role).map_err(ApiError::Internal)?;

    info!(userid = %user.userid, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, caller))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(userid): Path<String>,
) -> Result<Json<User>, ApiError> {
    // Callers may read their own record; only elevated roles read others'.
    if caller.userid != userid && !caller.role.is_elevated() {
        warn!(caller = %caller.userid, target = %userid, "cross-user fetch denied");
        return Err(ApiError::Forbidden);
    }

    let user = User::find_by_userid(&state.db, &userid)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(Json(user))
}

#[instrument(skip(state, caller, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.userid.is_empty() || payload.email.is_empty() {
        return Err(ApiError::Validation("User ID and Email are required.".into()));
    }

    let role = parse_role(payload.role.as_deref())?;

    let uid = User::resolve_uid(&state.db, &payload.userid)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let changed = User::update_profile(
        &state.db,
        &uid,
        &payload.full_name,
        &payload.phone,
        &payload.address,
        &payload.email,
        role,
        &util::updated_at_now(),
    )
    .await?;

    if changed == 0 {
        return Err(ApiError::NoChanges);
    }

    info!(userid = %payload.userid, caller = %caller.userid, "profile updated");
    Ok(Json(MessageResponse {
        message: "Update Success",
    }))
}

#[instrument(skip(state, caller, payload))]
pub async fn update_role(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.userid.is_empty() {
        return Err(ApiError::Validation("User ID is required.".into()));
    }

    // A role outside the set answers 404, kept as-is for compatibility.
    let role = payload
        .role
        .trim()
        .parse::<Role>()
        .map_err(|_| ApiError::InvalidRole)?;

    let uid = User::resolve_uid(&state.db, &payload.userid)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let changed = User::update_role(&state.db, &uid, role, &util::updated_at_now()).await?;
    if changed == 0 {
        return Err(ApiError::NoChanges);
    }

    info!(userid = %payload.userid, role = %role, caller = %caller.userid, "role updated");
    Ok(Json(MessageResponse {
        message: "Update Success",
    }))
}
