//! Access-log middleware: extracts request attributes and routes one
//! structured record per request to a severity channel.

use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::sink::{Field, Severity};
use crate::state::AppState;

/// Logs every request through the state's [`crate::sink::LogSink`].
///
/// Request-side attributes are captured before the handler runs, the
/// response side afterwards. Exactly one emission happens per request,
/// on the channel picked by [`severity_for`]. Missing or malformed
/// headers degrade to omitted fields; this layer never fails a request.
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health))
///     .layer(middleware::from_fn_with_state(state.clone(), access_log::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let method = req.method().to_string();
    let url = req.uri().to_string();
    let request_uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut fields = vec![Field::str("http.method", &method), Field::str("http.url", &url)];

    let ip = resolve_client_ip(req.headers(), addr.ip());
    if !ip.is_empty() {
        fields.push(Field::str("network.client.ip", &ip));
    }

    let user_agent = header_value(req.headers(), header::USER_AGENT.as_str());
    if !user_agent.is_empty() {
        fields.push(Field::str("http.useragent", user_agent));
    }

    let referer = header_value(req.headers(), header::REFERER.as_str());
    if !referer.is_empty() {
        fields.push(Field::str("http.referer", referer));
    }

    if let Some(request_id) = request_id(req.headers()) {
        fields.push(Field::str("http.request_id", request_id));
    }

    let bytes_read = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(-1);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    fields.push(Field::i32("http.status_code", status as i32));
    fields.push(Field::i64("network.bytes_read", bytes_read));

    if let Some(written) = response.body().size_hint().exact().filter(|&n| n > 0) {
        fields.push(Field::i32("network.bytes_written", written as i32));
    }

    let duration = start.elapsed().as_nanos() as i64;
    fields.push(Field::i64("duration", duration));

    let summary = format!(
        "{} {} {} ({}) {:.2}ms",
        status,
        method,
        request_uri,
        ip,
        duration as f64 / 1e6,
    );

    match severity_for(status) {
        Severity::Info => st.sink.info(&summary, &fields).await,
        Severity::Warn => st.sink.warn(&summary, &fields).await,
        Severity::Error => st.sink.error(&summary, &fields).await,
    }

    response
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Resolves the client IP through a fixed-priority header chain, falling
/// back to the connection's remote address.
///
/// The chain short-circuits at the first non-empty source. An
/// `X-Forwarded-For` value yields its first comma-separated element,
/// trimmed; if that element is blank the result is empty and the field
/// is omitted upstream.
fn resolve_client_ip(headers: &HeaderMap, remote: IpAddr) -> String {
    let ip = header_value(headers, "cf-connecting-ip");
    if !ip.is_empty() {
        return ip.to_string();
    }

    let ip = header_value(headers, "true-client-ip");
    if !ip.is_empty() {
        return ip.to_string();
    }

    let forwarded = header_value(headers, "x-forwarded-for");
    if !forwarded.is_empty() {
        return forwarded.split(',').next().unwrap_or("").trim().to_string();
    }

    remote.to_string()
}

/// `X-Request-Id`, else `X-Amzn-Trace-Id`, else nothing.
fn request_id(headers: &HeaderMap) -> Option<&str> {
    let id = header_value(headers, "x-request-id");
    if !id.is_empty() {
        return Some(id);
    }

    let id = header_value(headers, "x-amzn-trace-id");
    if !id.is_empty() {
        return Some(id);
    }

    None
}

/// Picks the severity channel for a final status code.
///
/// The half-open ranges leave 499 and 599 on the informational channel.
/// That matches the historical behavior dashboards and alerts are tuned
/// against, so it is kept as-is.
fn severity_for(status: u16) -> Severity {
    if (400..499).contains(&status) {
        Severity::Warn
    } else if (500..599).contains(&status) {
        Severity::Error
    } else {
        Severity::Info
    }
}
