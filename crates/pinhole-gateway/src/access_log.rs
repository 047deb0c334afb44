//! Per-request access logging.
//!
//! [`access_log`] emits one event on the [`ACCESS_LOG_TARGET`] target for
//! every request. [`AccessLineFormat`] renders those events as single lines
//! for an append-only access log file.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use jiff::Timestamp;
use std::fmt;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{info, Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

pub const ACCESS_LOG_TARGET: &str = "access";

/// Middleware recording method, path, status and elapsed time of each request.
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    info!(
        target: ACCESS_LOG_TARGET,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "request completed"
    );
    response
}

/// Formats access events as `<time> | <METHOD> <path> | Status: <code> | <ms>ms`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLineFormat;

impl<S, N> FormatEvent<S, N> for AccessLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = AccessFields::default();
        event.record(&mut fields);
        writeln!(
            writer,
            "{} | {} {} | Status: {} | {}ms",
            Timestamp::now(),
            fields.method,
            fields.path,
            fields.status,
            fields.elapsed_ms
        )
    }
}

#[derive(Debug, Default)]
struct AccessFields {
    method: String,
    path: String,
    status: u64,
    elapsed_ms: u64,
}

impl Visit for AccessFields {
    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "status" => self.status = value,
            "elapsed_ms" => self.elapsed_ms = value,
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "method" => self.method = value.to_string(),
            "path" => self.path = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // `%value` fields arrive here, wrapped so that Debug prints Display
        match field.name() {
            "method" => self.method = format!("{value:?}"),
            "path" => self.path = format!("{value:?}"),
            _ => {}
        }
    }
}
