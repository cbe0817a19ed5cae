use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::services::dashboard::DashboardService;
use crate::views::{Page, SearchForm};

pub struct AppState {
    pub dashboard: DashboardService,
}

#[derive(Deserialize)]
pub struct DetailParams {
    pub name: Option<String>,
}

pub async fn get_home(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    build_view(state, Page::Home).await
}

pub async fn get_search(
    State(state): State<Arc<AppState>>,
    Query(form): Query<SearchForm>,
) -> impl IntoResponse {
    build_view(state, Page::Search(form)).await
}

pub async fn get_competitor(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailParams>,
) -> impl IntoResponse {
    build_view(state, Page::Details(params.name)).await
}

pub async fn get_countries(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    build_view(state, Page::Countries).await
}

pub async fn get_leaderboards(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    build_view(state, Page::Leaderboards).await
}

/// Query failures are part of the view body, so a built view is always 200.
async fn build_view(state: Arc<AppState>, page: Page) -> Response {
    match tokio::task::spawn_blocking(move || state.dashboard.view(&page)).await {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            log::error!("View task failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "View Error").into_response()
        }
    }
}
