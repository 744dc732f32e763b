use crate::aggregate::build_dashboard;
use crate::errors::AppError;
use crate::models::{DashboardResponse, RangeResponse, WindowQuery};
use crate::state::AppState;
use crate::ui::render_index;
use crate::window::{self, DateWindow};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.dataset))
}

pub async fn get_range(State(state): State<AppState>) -> Json<RangeResponse> {
    Json(window::slider_config(&state.dataset))
}

/// Recomputes the three chart series for the selected window. A window
/// outside the dataset span simply comes back empty; an inverted window is
/// a client bug and gets a 400.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let selection = DateWindow::from_unix(query.start, query.end)?;
    Ok(Json(build_dashboard(&state.dataset, selection)))
}
