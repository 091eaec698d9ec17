//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Route table

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Create router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/token", post(handlers::login))
        .route(
            "/users",
            post(handlers::create_user)
                .get(handlers::list_users)
                .patch(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/users/roles", get(handlers::list_roles))
        .route("/users/me", get(handlers::get_me).patch(handlers::update_me))
        .route("/users/me/change_password", patch(handlers::change_password))
        .route("/users/me/forgot_password", post(handlers::forgot_password))
        .route("/users/me/reset_password", post(handlers::reset_password))
        .route(
            "/users/me/reset_password_template",
            get(handlers::reset_password_template),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
