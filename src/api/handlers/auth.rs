use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{info, warn};

use super::AppState;
use crate::{
    auth::{
        check_credentials, issue_session,
        session::{expired_session_cookie, safe_redirect_target, session_cookie},
    },
    error::Result,
    models::{LoginForm, NextQuery},
};

/// GET /login
pub async fn login_page(Query(query): Query<NextQuery>) -> Html<String> {
    Html(render_login(None, query.next.as_deref()))
}

/// POST /login
/// A `next` form field wins over the `?next=` query parameter.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = &state.config.auth;
    let next = form.next.as_deref().or(query.next.as_deref());

    let Some(user) = check_credentials(&auth.users, &form.username, &form.password)? else {
        warn!(username = %form.username, "rejected login");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Html(render_login(Some("Invalid credentials"), next)),
        )
            .into_response());
    };

    let token = issue_session(&user.username, auth)?;
    let cookie = session_cookie(
        &token,
        auth.session_expiry_hours * 3600,
        auth.cookie_secure,
    );

    info!(username = %user.username, "login succeeded");
    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(safe_redirect_target(next)),
    )
        .into_response())
}

/// GET /logout
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(
            header::SET_COOKIE,
            expired_session_cookie(state.config.auth.cookie_secure),
        )],
        Redirect::to("/"),
    )
        .into_response()
}

fn render_login(error: Option<&str>, next: Option<&str>) -> String {
    let error_line = error
        .map(|e| format!("<p class=\"error\">{}</p>\n", escape_html(e)))
        .unwrap_or_default();
    let next_field = next
        .map(|n| {
            format!(
                "<input type=\"hidden\" name=\"next\" value=\"{}\">\n",
                escape_html(safe_redirect_target(Some(n)))
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Login</title></head>\n<body>\n<h1>Login</h1>\n{}<form method=\"post\" action=\"/login\">\n{}<input type=\"text\" name=\"username\" placeholder=\"Username\">\n<input type=\"password\" name=\"password\" placeholder=\"Password\">\n<button type=\"submit\">Login</button>\n</form>\n</body>\n</html>\n",
        error_line, next_field
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_login_plain() {
        let html = render_login(None, None);
        assert!(html.contains("name=\"username\""));
        assert!(html.contains("name=\"password\""));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("name=\"next\""));
    }

    #[test]
    fn test_render_login_with_error_and_next() {
        let html = render_login(Some("Invalid credentials"), Some("/upload_to_wigle"));
        assert!(html.contains("<p class=\"error\">Invalid credentials</p>"));
        assert!(html.contains("value=\"/upload_to_wigle\""));
    }

    #[test]
    fn test_render_login_escapes_next() {
        let html = render_login(None, Some("/\"><script>alert(1)</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_render_login_drops_foreign_next() {
        let html = render_login(None, Some("https://evil.example/"));
        assert!(html.contains("value=\"/\""));
    }
}
