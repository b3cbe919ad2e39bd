use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::ORIGIN},
    middleware::Next,
    response::Response,
};

use crate::{errors::HttpError, state::HttpState};

pub const CSRF_HEADER: &str = "x-bluefin-token";

const LOOPBACK_HOSTS: [&str; 3] = ["127.0.0.1", "localhost", "[::1]"];

/// Rejects `/api` calls from non-loopback origins or without the page token.
pub async fn require_csrf(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    if let Some(origin) = req.headers().get(ORIGIN) {
        let origin = origin.to_str().map_err(|_| {
            HttpError::new(
                StatusCode::BAD_REQUEST,
                "invalid Origin header",
                Some("invalid_origin"),
            )
        })?;
        if !is_loopback_origin(origin) {
            tracing::warn!(origin, "rejected cross-origin api call");
            return Err(HttpError::new(
                StatusCode::FORBIDDEN,
                "invalid origin",
                Some("invalid_origin"),
            ));
        }
    }

    let token = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok());
    if token != Some(state.csrf_token.as_str()) {
        return Err(HttpError::new(
            StatusCode::UNAUTHORIZED,
            "missing or invalid CSRF token",
            Some("csrf_invalid"),
        ));
    }

    Ok(next.run(req).await)
}

fn is_loopback_origin(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    LOOPBACK_HOSTS.iter().any(|host| {
        rest.strip_prefix(host)
            .and_then(|port| port.strip_prefix(':'))
            .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
    })
}

#[cfg(test)]
mod tests {
    use super::is_loopback_origin;

    #[test]
    fn loopback_origins_need_a_port() {
        assert!(is_loopback_origin("http://127.0.0.1:3846"));
        assert!(is_loopback_origin("https://localhost:8080"));
        assert!(is_loopback_origin("http://[::1]:3846"));
        assert!(!is_loopback_origin("http://localhost"));
        assert!(!is_loopback_origin("http://localhost.evil.com:80"));
        assert!(!is_loopback_origin("http://127.0.0.1:80@evil.com"));
        assert!(!is_loopback_origin("ftp://127.0.0.1:21"));
    }
}
