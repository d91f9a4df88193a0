use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};

use fastchow_core::SessionId;

use crate::app::sessions::SessionStore;
use crate::context::SessionContext;

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<SessionStore>,
    pub cookie_name: Arc<str>,
}

/// Bind a cart session to the request, minting one when the cookie is missing,
/// malformed, or names a session this process no longer knows.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let requested = extract_session_id(req.headers(), &state.cookie_name);
    let (session, created) = state.sessions.get_or_create(requested);

    req.extensions_mut()
        .insert(SessionContext::new(Arc::clone(&session)));

    let mut res = next.run(req).await;

    if created {
        match HeaderValue::from_str(&session_cookie(&state.cookie_name, session.id())) {
            Ok(value) => {
                res.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "could not encode session cookie"),
        }
    }

    res
}

pub fn session_cookie(name: &str, session_id: SessionId) -> String {
    format!("{name}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

fn extract_session_id(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let id = SessionId::new();
        let headers = headers(&format!("theme=dark; fastchow_session={id}; lang=en"));
        assert_eq!(extract_session_id(&headers, "fastchow_session"), Some(id));
    }

    #[test]
    fn malformed_or_missing_cookie_yields_none() {
        assert_eq!(
            extract_session_id(&headers("fastchow_session=not-a-uuid"), "fastchow_session"),
            None
        );
        assert_eq!(extract_session_id(&headers("other=1"), "fastchow_session"), None);
        assert_eq!(extract_session_id(&HeaderMap::new(), "fastchow_session"), None);
    }

    #[test]
    fn cookie_attributes() {
        let id = SessionId::new();
        assert_eq!(
            session_cookie("fastchow_session", id),
            format!("fastchow_session={id}; Path=/; HttpOnly; SameSite=Lax")
        );
    }
}
