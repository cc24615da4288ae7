use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse,
};

use super::redirect;
use crate::{
    app::{AppError, AppState},
    auth::{
        authenticate, error::AuthError, flash, requester::Requester, SESSION_USER_ID,
    },
    forms::{
        login::{validate_login, LoginForm, LoginInput},
        FormErrors,
    },
    templates::page_context,
};

fn render_login(
    app_state: &AppState,
    requester: &Requester,
    session: &Session,
    form: LoginForm,
) -> Result<HttpResponse, AppError> {
    let mut context = page_context(requester.user(), flash::take(session));
    context.insert("form", &form);
    app_state.templates.render("login.html", &context)
}

/// Pipe for showing the login form
/// - url: `{domain}/login`
///
/// # Response
/// ## Ok
/// - empty login form
#[get("/login")]
pub async fn show_login(
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
) -> Result<HttpResponse, AppError> {
    render_login(&app_state, &requester, &session, LoginForm::default())
}

/// Pipe for logging in as user
/// - url: `{domain}/login`
///
/// # HTTP request requirements
/// ## body
/// - url encoded form containing `username` and `password` keys
///
/// # Response
/// ## Ok
/// - redirect to `/blogs`, the session now holds the user id
/// - the login form again, carrying the errors, when a field is missing or
///   the credentials are wrong
/// ## Error
/// - Internal server error
#[post("/login")]
pub async fn submit_login(
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
    form: web::Form<LoginInput>,
) -> Result<HttpResponse, AppError> {
    let input = form.into_inner();
    let credentials = match validate_login(&input) {
        Ok(credentials) => credentials,
        Err(errors) => {
            return render_login(&app_state, &requester, &session, LoginForm::bound(&input, errors))
        }
    };

    match authenticate(app_state.users.as_ref(), &credentials) {
        Ok(user) => {
            session.renew();
            session.insert(SESSION_USER_ID, user.id).map_err(|err| {
                log::error!("Could not store the session: {}", err);
                AppError::InternalServerError
            })?;
            log::info!("User {} logged in", user.username);

            Ok(redirect("/blogs"))
        }
        Err(AuthError::WrongCredentials) => {
            log::warn!("Failed login attempt for {}", credentials.username);

            let mut errors = FormErrors::default();
            errors.add_non_field(AuthError::WrongCredentials.to_string());
            render_login(&app_state, &requester, &session, LoginForm::bound(&input, errors))
        }
        Err(AuthError::Store(err)) => Err(err),
    }
}

/// Pipe for ending the session, works for anonymous requests too
/// - url: `{domain}/logout`
///
/// # Response
/// ## Ok
/// - redirect to `/login`, session cookie removed
#[get("/logout")]
pub async fn show_logout(session: Session) -> HttpResponse {
    session.purge();
    redirect("/login")
}
