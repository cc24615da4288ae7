use actix_session::SessionExt;
use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use super::SESSION_USER_ID;
use crate::{
    app::{AppError, AppState},
    database::models::User,
};

/// Identity of whoever sent the request, resolved from the session once per
/// request and handed to the handler as an argument.
#[derive(Debug, Clone, Default)]
pub struct Requester {
    user: Option<User>,
}

impl Requester {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn logged_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_login(&self) -> Result<&User, AppError> {
        self.user.as_ref().ok_or(AppError::LoginRequired)
    }
}

impl FromRequest for Requester {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(load_requester(req))
    }
}

/** A session pointing at a user that no longer exists counts as anonymous */
fn load_requester(req: &HttpRequest) -> Result<Requester, AppError> {
    let app_state = req
        .app_data::<Data<AppState>>()
        .ok_or(AppError::InternalServerError)?;

    let user_id = req
        .get_session()
        .get::<i32>(SESSION_USER_ID)
        .ok()
        .flatten();

    match user_id {
        Some(user_id) => Ok(app_state
            .users
            .find_by_id(user_id)?
            .map_or_else(Requester::anonymous, Requester::logged_in)),
        None => Ok(Requester::anonymous()),
    }
}
