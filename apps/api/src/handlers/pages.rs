//! HTML entry points the route guards protect.
//!
//! The real interface is a separate frontend; these shells exist so the
//! guard chain has concrete pages to run in front of.

use axum::response::Html;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Rosterly - Sign in</title></head>
<body><main><h1>Sign in</h1><p>POST /auth/login with email and password.</p></main></body>
</html>"#;

const ADMIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Rosterly - Admin</title></head>
<body><main><h1>Schedule administration</h1></main></body>
</html>"#;

const EMPLOYEE_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Rosterly - My shifts</title></head>
<body><main><h1>My shifts</h1></main></body>
</html>"#;

/// GET /login - Guest-only sign-in page.
pub async fn login_page_handler() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// GET /admin - Admin home.
pub async fn admin_page_handler() -> Html<&'static str> {
    Html(ADMIN_PAGE)
}

/// GET /employee - Employee home.
pub async fn employee_page_handler() -> Html<&'static str> {
    Html(EMPLOYEE_PAGE)
}
