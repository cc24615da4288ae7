//! Helpers shared by the handler tests.

use actix_web::{cookie::Cookie, dev::ServiceResponse, http::header};

use crate::{
    app::AppState,
    auth::password,
    database::{memory::MemoryStore, models::User},
    templates::Templates,
};

/// Builds the full application around `$state` with cookie backed sessions.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::generate(),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .configure($crate::routes::configure),
        )
        .await
    };
}

/// Logs in through `POST /login` and returns the session cookie.
macro_rules! login_as {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/login")
            .set_form(&[("username", $username), ("password", $password)])
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        $crate::testing::session_cookie(&resp).unwrap()
    }};
}

pub fn app_state() -> AppState {
    AppState::new(MemoryStore::default(), Templates::new().unwrap())
}

pub fn seed_user(app_state: &AppState, username: &str, pw: &str, is_staff: bool) -> User {
    app_state
        .users
        .create(username, &password::hash(pw), is_staff)
        .unwrap()
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .map(|cookie| cookie.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
