use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::handlers::AppState;
use crate::auth::{session::token_from_headers, verify_session};

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Lets the request through only with a valid session token; otherwise
/// redirects to the login form, remembering where the caller wanted to go.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let secret = &state.config.auth.session_secret;

    let claims = match token_from_headers(request.headers()) {
        Some(token) => match verify_session(&token, secret) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!("session token rejected: {}", e);
                None
            }
        },
        None => {
            debug!("no session token presented");
            None
        }
    };

    match claims {
        Some(claims) => {
            debug!("authenticated session: sub={}", claims.sub);
            request.extensions_mut().insert(AuthenticatedUser {
                username: claims.sub,
            });
            next.run(request).await
        }
        None => Redirect::to(&login_redirect(request.uri())).into_response(),
    }
}

/// `/login?next=<path and query>`, with the target percent-encoded.
fn login_redirect(uri: &Uri) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("/login?next={}", urlencoding::encode(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_keeps_query() {
        let uri: Uri = "/upload_to_wigle?dry=1&note=a%23b".parse().unwrap();
        assert_eq!(
            login_redirect(&uri),
            "/login?next=%2Fupload_to_wigle%3Fdry%3D1%26note%3Da%2523b"
        );
    }

    #[test]
    fn test_login_redirect_plain_path() {
        let uri: Uri = "/clear_database".parse().unwrap();
        assert_eq!(login_redirect(&uri), "/login?next=%2Fclear_database");
    }
}
