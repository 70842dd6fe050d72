use axum::{Extension, Json, Router, extract::Path, http::StatusCode, response::{Html, IntoResponse, Response}, routing::get};
use chrono::NaiveDate;
use today_core::{respond, today, Config, HistoryClient};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;


type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Clone)]
struct AppState {
    client: Option<HistoryClient>,
}

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let client = HistoryClient::from_config(config)
        .inspect_err(|e| tracing::error!(error = %e, "could not build HTTP client"))
        .ok();

    let router = app(AppState { client });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handler))
        .route("/today", get(get_today))
        .route("/day/{month}/{day}", get(get_day))
        .layer(cors)
        .layer(Extension(state))
}

async fn handler() -> Html<&'static str> {
    Html("<h1>Today in history</h1><p>See <a href=\"/today\">/today</a>.</p>")
}

async fn get_today(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(respond(state.client.as_ref(), today()).await)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{month}/{day} is not a calendar day")]
    InvalidDay { month: u32, day: u32 },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("->> {}", self);

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        let status = match self {
            ApiError::InvalidDay { .. } => StatusCode::BAD_REQUEST,
        };

        (status, body).into_response()
    }
}

/// Payload for any calendar day, handy for checking keyword hits.
async fn get_day(
    Extension(state): Extension<AppState>,
    Path((month, day)): Path<(u32, u32)>,
) -> Result<impl IntoResponse, ApiError> {
    // Only month and day reach the payload; a leap year lets 2/29 through.
    let date = NaiveDate::from_ymd_opt(2000, month, day)
        .ok_or(ApiError::InvalidDay { month, day })?;

    Ok(Json(respond(state.client.as_ref(), date).await))
}
