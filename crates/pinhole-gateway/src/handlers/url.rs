use crate::error::Result;
use crate::model::{CreateUrlRequest, CreateUrlResponse, StatsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::{ClickEvent, ShortCode};
use std::net::SocketAddr;
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;
    let created = state.registry().create(request.into()).await?;

    let base_url = match state.base_url() {
        Some(base) => base.to_string(),
        None => request_base_url(&headers),
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_link: created.short_code.to_url(&base_url),
            expiry: created.expires_at,
        }),
    ))
}

pub async fn get_stats_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>> {
    let stats = state.registry().stats(&short_code).await?;
    Ok(Json(stats.into()))
}

/// Resolves the code, records the visit, then redirects with `302 Found`.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    request: Request,
) -> Result<Response> {
    let (referrer, origin) = click_source(&request);
    redirect(&state, &short_code, referrer, origin).await
}

/// `GET /shorturls` is the redirect for the code `shorturls`, which the
/// create route's path would otherwise shadow.
pub async fn shorturls_redirect_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response> {
    let (referrer, origin) = click_source(&request);
    redirect(&state, SHORTURLS_CODE, referrer, origin).await
}

const SHORTURLS_CODE: &str = "shorturls";

/// The `Referer` header and peer IP of a visit, when present.
fn click_source(request: &Request) -> (Option<String>, Option<String>) {
    let referrer = request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let origin = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());
    (referrer, origin)
}

async fn redirect(
    state: &AppState,
    short_code: &str,
    referrer: Option<String>,
    origin: Option<String>,
) -> Result<Response> {
    let original_url = state.registry().resolve(short_code).await?;

    let event = ClickEvent::new(state.clock().now(), referrer, origin);
    // resolve succeeded, so the code is well formed
    let code = ShortCode::new_unchecked(short_code);
    state.analytics().record_click(&code, event).await?;

    debug!(code = %code, url = %original_url, "redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
}

/// `http://<Host>` of the incoming request, for links when no public base URL
/// is configured.
fn request_base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}
