use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    extract::{Path, Query, Request, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE, HOST},
        HeaderMap, HeaderValue,
    },
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::pages::{landing_page, preview_page, PreviewMeta};
use crate::render;
use crate::routes::Route;
use crate::time::{self, Clock, SystemClock};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub default_tz: Tz,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let default_tz = time::parse_tz(&config.default_tz)?;
        Ok(Self { config: Arc::new(config), default_tz, clock })
    }

    fn cache_control(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("max-age={}", self.config.cache_max_age_secs))
            .unwrap_or_else(|_| HeaderValue::from_static("max-age=600"))
    }

    /// Day count for `date`, clamped at zero for dates that have not happened yet.
    fn incident_days(&self, date: &str, tz: Tz) -> Result<i64, AppError> {
        let incident = time::parse_incident_date(date)?;
        let days = time::days_since(incident, tz, self.clock.now());
        if days < 0 {
            warn!(%date, %tz, days, "incident date is in the future; clamping to 0");
        }
        Ok(days.max(0))
    }

    /// Configured public URL, else the request's own origin as seen through any TLS proxy.
    fn base_url(&self, headers: &HeaderMap) -> String {
        if let Some(url) = &self.config.public_url {
            return url.clone();
        }
        let scheme = headers
            .get(X_FORWARDED_PROTO)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| v == "https" || v == "http")
            .unwrap_or_else(|| "http".to_string());
        headers
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .map(|host| format!("{scheme}://{host}"))
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TzQuery {
    pub tz: Option<String>,
}

#[derive(Debug, Serialize)]
struct IncidentSummary {
    date: String,
    tz: String,
    days: i64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/:file", get(by_file))
        .fallback(not_found)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C.
pub async fn run(cfg: Config) -> Result<()> {
    let addr = cfg.listen_addr();
    let state = AppState::new(cfg, Arc::new(SystemClock))?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "ctrl_c handler failed; serving until killed");
        std::future::pending::<()>().await;
    }
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();
    let resp = next.run(req).await;
    info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "http.request"
    );
    resp
}

async fn landing() -> Html<&'static str> {
    Html(landing_page())
}

async fn not_found() -> AppError {
    AppError::NotFound
}

async fn by_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(query): Query<TzQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let route = Route::parse(&file).ok_or(AppError::NotFound)?;
    let resolve_tz = || time::resolve_tz(query.tz.as_deref(), state.default_tz);

    match route {
        Route::DaysPng(n) => {
            let days: i64 = n.parse().map_err(|_| AppError::DayCountOutOfRange(n))?;
            let png = render_png(days).await?;
            Ok(([(CONTENT_TYPE, "image/png"), (ACCESS_CONTROL_ALLOW_ORIGIN, "*")], png).into_response())
        }
        Route::IncidentPng(date) => {
            let tz = resolve_tz()?;
            let days = state.incident_days(&date, tz)?;
            let png = render_png(days).await?;
            Ok((
                [
                    (CONTENT_TYPE, HeaderValue::from_static("image/png")),
                    (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
                    (CACHE_CONTROL, state.cache_control()),
                ],
                png,
            )
                .into_response())
        }
        Route::IncidentPreview(date) => {
            let tz = resolve_tz()?;
            let days = state.incident_days(&date, tz)?;
            let base_url = state.base_url(&headers);
            let tz_name = tz.name();
            let html = preview_page(&PreviewMeta { base_url: &base_url, date: &date, tz: tz_name, days });
            Ok(([(CACHE_CONTROL, state.cache_control())], Html(html)).into_response())
        }
        Route::IncidentJson(date) => {
            let tz = resolve_tz()?;
            let days = state.incident_days(&date, tz)?;
            let summary = IncidentSummary { date, tz: tz.name().to_string(), days };
            Ok((
                [
                    (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
                    (CACHE_CONTROL, state.cache_control()),
                ],
                Json(summary),
            )
                .into_response())
        }
    }
}

async fn render_png(days: i64) -> Result<Vec<u8>, AppError> {
    let png = tokio::task::spawn_blocking(move || render::render(days)?.encode_png()).await??;
    Ok(png)
}
