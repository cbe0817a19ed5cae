use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{
    get_competitor, get_countries, get_home, get_leaderboards, get_search, AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/home", get(get_home))
        .route("/api/search", get(get_search))
        .route("/api/competitor", get(get_competitor))
        .route("/api/countries", get(get_countries))
        .route("/api/leaderboards", get(get_leaderboards))
        .with_state(state)
}
