//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! HTTP request handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Form, Json,
};
use tracing::info;

use accounts_auth::{
    require, AuthResult, ChangePassword, CurrentPrincipal, Principal, Role, SignUp, UserUpdate,
    UserUpdateMe, USERS,
};

use crate::state::AppState;
use crate::types::{
    AccessTokenQuery, HealthResponse, LoginForm, ResetPasswordForm, ResetPasswordPage,
    ResultMessage, Token, UserEmailQuery, UserMe, UserOut,
};

async fn user_me(state: &AppState, principal: Principal) -> AuthResult<UserMe> {
    let permissions = state.auth.permissions_for(principal.role)?;
    Ok(UserMe::new(principal, permissions))
}

/// POST /v1/token
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Json<Token>> {
    let principal = state.auth.authenticate(&form.username, &form.password).await?;
    let token = state.auth.issue_session_token(&principal).await?;
    Ok(Json(Token::bearer(token)))
}

/// POST /v1/users
pub async fn create_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(signup): Json<SignUp>,
) -> AuthResult<(StatusCode, Json<UserOut>)> {
    let principal = state
        .auth
        .authorize(principal, &require([USERS.create().clone()]))
        .await?;

    let created = state.auth.user_manager().signup(signup).await?;
    info!("{} registered {}", principal.email, created.email);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /v1/users
pub async fn list_users(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> AuthResult<Json<Vec<UserOut>>> {
    state
        .auth
        .authorize(principal, &require([USERS.view_list().clone()]))
        .await?;

    let users = state.auth.user_manager().list().await?;
    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

/// PATCH /v1/users?user_email=
pub async fn update_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(query): Query<UserEmailQuery>,
    Json(update): Json<UserUpdate>,
) -> AuthResult<Json<UserOut>> {
    state
        .auth
        .authorize(
            principal,
            &require([USERS.view_details().clone(), USERS.edit().clone()]),
        )
        .await?;

    let updated = state
        .auth
        .user_manager()
        .update(&query.user_email, update)
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /v1/users?user_email=
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(query): Query<UserEmailQuery>,
) -> AuthResult<Json<ResultMessage>> {
    state
        .auth
        .authorize(principal, &require([USERS.delete().clone()]))
        .await?;

    state.auth.user_manager().delete(&query.user_email).await?;
    Ok(Json(ResultMessage::new(format!(
        "User with email {} has been deleted successfully!",
        query.user_email
    ))))
}

/// GET /v1/users/roles
pub async fn list_roles(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> AuthResult<Json<Vec<Role>>> {
    state
        .auth
        .authorize(principal, &require([USERS.required_extra("VIEW_ROLES")?]))
        .await?;

    Ok(Json(state.auth.roles()))
}

/// GET /v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> AuthResult<Json<UserMe>> {
    let principal = state
        .auth
        .authorize(principal, &require([USERS.required_extra("VIEW_ME")?]))
        .await?;

    Ok(Json(user_me(&state, principal).await?))
}

/// PATCH /v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(update): Json<UserUpdateMe>,
) -> AuthResult<Json<UserMe>> {
    let principal = state
        .auth
        .authorize(principal, &require([USERS.required_extra("EDIT_ME")?]))
        .await?;

    let updated = state
        .auth
        .user_manager()
        .update_me(&principal.email, update)
        .await?;
    Ok(Json(user_me(&state, updated).await?))
}

/// PATCH /v1/users/me/change_password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(body): Json<ChangePassword>,
) -> AuthResult<Json<ResultMessage>> {
    let principal = state
        .auth
        .authorize(principal, &require([USERS.required_extra("CHANGE_PASSWORD")?]))
        .await?;

    state
        .auth
        .user_manager()
        .change_password(&principal.email, &body.old_password, &body.new_password)
        .await?;
    Ok(Json(ResultMessage::new(format!(
        "{} your password has been updated!",
        principal.name
    ))))
}

/// POST /v1/users/me/forgot_password?user_email=
pub async fn forgot_password(
    State(state): State<AppState>,
    Query(query): Query<UserEmailQuery>,
) -> Json<ResultMessage> {
    state
        .auth
        .forgot_password(&query.user_email, &state.config.public_base_url)
        .await;

    Json(ResultMessage::new(format!(
        "An email has been sent to {} with a link for password reset.",
        query.user_email
    )))
}

/// GET /v1/users/me/reset_password_template?access_token=
///
/// Target of the emailed reset link. The token is checked before the form
/// is described.
pub async fn reset_password_template(
    State(state): State<AppState>,
    Query(query): Query<AccessTokenQuery>,
) -> AuthResult<Json<ResetPasswordPage>> {
    let principal = state.auth.current_principal(&query.access_token).await?;
    Ok(Json(ResetPasswordPage::new(principal, &query.access_token)))
}

/// POST /v1/users/me/reset_password?access_token=
pub async fn reset_password(
    State(state): State<AppState>,
    Query(query): Query<AccessTokenQuery>,
    Form(form): Form<ResetPasswordForm>,
) -> AuthResult<Json<ResultMessage>> {
    let principal = state
        .auth
        .reset_password(&query.access_token, &form.new_password)
        .await?;

    Ok(Json(ResultMessage::new(format!(
        "{} your password has been reset!",
        principal.name
    ))))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: crate::SERVER_NAME.to_string(),
        version: crate::SERVER_VERSION.to_string(),
        timestamp: chrono::Utc::now(),
    })
}
