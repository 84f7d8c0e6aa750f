//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::planner::{PlannerError, RouteRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/edges", post(add_edge))
        .route("/api/route", get(best_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with station list and route form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stations = state.stations().await;
    let html = IndexTemplate::new(&stations)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

/// List registered stations.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .stations()
        .await
        .into_iter()
        .map(|s| s.as_str().to_string())
        .collect();

    Json(StationsResponse { stations })
}

/// Add a bidirectional route and re-derive transfer edges.
async fn add_edge(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AddEdgeResponse>), AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: AddEdgeRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "JSON parse error: {e}");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let fact = req.into_fact()?;
    let (edges, stations) = state.add_route(fact).await;

    Ok((StatusCode::CREATED, Json(AddEdgeResponse { edges, stations })))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Find the best route between two stations.
async fn best_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let metric = query.metric.as_deref().unwrap_or("time");
    let request = RouteRequest::parse(&query.from, &query.to, metric)?;

    let route = state.plan(&request).await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = RouteResultTemplate {
            route: RouteView::from_route(&route),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(RouteResponse::from_route(&route)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::Invalid(inner) => inner.into(),
            PlannerError::UnknownStation(_) | PlannerError::NoRouteFound { .. } => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
