use std::{fmt::Display, sync::Arc};

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use diesel::result::DatabaseErrorKind;

use crate::{
    database::models::{BlogRepository, CategoryRepository, UserRepository},
    templates::Templates,
};

/** Used for reaching the stores and the templates when handling requests */
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Serves all three repositories from the same store.
    pub fn new<S>(store: S, templates: Templates) -> Self
    where
        S: BlogRepository + CategoryRepository + UserRepository + 'static,
    {
        let store = Arc::new(store);
        Self {
            blogs: store.clone(),
            categories: store.clone(),
            users: store,
            templates: Arc::new(templates),
        }
    }
}

/** Holds the errors we will used during request processing */
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    NotFound,
    PermissionDenied,
    LoginRequired,
    BadRequest,
    InternalServerError,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound => f.write_str("Not found"),
            AppError::PermissionDenied => f.write_str("Only for the blog owner"),
            AppError::LoginRequired => f.write_str("Login required"),
            AppError::BadRequest => f.write_str("Bad request"),
            AppError::InternalServerError => f.write_str("Internal server error"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PermissionDenied => StatusCode::FORBIDDEN,
            AppError::LoginRequired => StatusCode::FOUND,
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::LoginRequired = self {
            return HttpResponse::Found()
                .insert_header((header::LOCATION, "/login"))
                .finish();
        }

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(format!("<h1>{}</h1>", self))
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => AppError::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::BadRequest
            }
            _ => {
                log::error!("Database error: {}", err);
                AppError::InternalServerError
            }
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        log::error!("Could not get a database connection: {}", err);
        AppError::InternalServerError
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        log::error!("Template rendering failed: {:?}", err);
        AppError::InternalServerError
    }
}

impl std::error::Error for AppError {}
