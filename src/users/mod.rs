use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod role;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/updateUser", put(handlers::update_user))
        .route("/updateRole", put(handlers::update_role))
        .route("/:userid", get(handlers::get_user))
}
