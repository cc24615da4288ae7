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
        flash::{self, FlashMessage},
        requester::Requester,
    },
    database::models::Category,
    forms::category::{validate_category, CategoryForm, CategoryInput, DUPLICATE_NAME},
    templates::page_context,
};

// None of the category pipes check who is asking.

fn find_category(app_state: &AppState, category_id: i32) -> Result<Category, AppError> {
    app_state
        .categories
        .find_by_id(category_id)?
        .ok_or(AppError::NotFound)
}

/// Pipe for listing categories, every row comes with its own edit form
/// - url: `{domain}/categories`
///
/// # Response
/// ## Ok
/// - html list of categories, forms and queued messages
/// ## Error
/// - Internal server error
#[get("/categories")]
pub async fn category_list(
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let category_qs = app_state.categories.find_all()?;
    let forms = category_qs
        .iter()
        .map(CategoryForm::from_record)
        .collect::<Vec<_>>();

    let mut context = page_context(requester.user(), flash::take(&session));
    context.insert("category_qs", &category_qs);
    context.insert("forms", &forms);
    app_state.templates.render("list_category.html", &context)
}

/// Pipe for creating a category
/// - url: `{domain}/categories/new`
///
/// # HTTP request requirements
/// ## body
/// - name: [String]
/// - description: [String] (optional)
///
/// # Response
/// ## Ok
/// - redirect to `/categories`, when validation fails an error message is
///   queued for the list page
#[post("/categories/new")]
pub async fn category_create(
    app_state: Data<AppState>,
    session: Session,
    form: web::Form<CategoryInput>,
) -> Result<HttpResponse, AppError> {
    let existing = app_state.categories.find_all()?;

    let summary = match validate_category(&form, &existing, None) {
        Ok(fields) => match app_state.categories.create(&fields) {
            Ok(category) => {
                log::info!("Category {} created", category.id);
                None
            }
            //The unique index caught a name created after the check above
            Err(AppError::BadRequest) => Some(DUPLICATE_NAME.to_string()),
            Err(err) => return Err(err),
        },
        Err(errors) => Some(errors.summary()),
    };

    if let Some(summary) = summary {
        flash::push(
            &session,
            FlashMessage::error(format!("create error {}", summary)),
        )?;
    }

    Ok(redirect("/categories"))
}

/// Pipe for editing a category, an invalid submission is dropped without
/// feedback
/// - url: `{domain}/categories/{category_id}/edit`
///
/// # Response
/// ## Ok
/// - redirect to `/categories`
/// ## Error
/// - Not found
#[post("/categories/{category_id:\\d+}/edit")]
pub async fn category_edit(
    path: web::Path<i32>,
    app_state: Data<AppState>,
    form: web::Form<CategoryInput>,
) -> Result<HttpResponse, AppError> {
    let mut category = find_category(&app_state, path.into_inner())?;
    let existing = app_state.categories.find_all()?;

    match validate_category(&form, &existing, Some(category.id)) {
        Ok(fields) => {
            category.apply(&fields);
            match app_state.categories.save(&category) {
                Ok(()) => log::info!("Category {} edited", category.id),
                Err(AppError::BadRequest) => {
                    log::debug!("Ignored edit of category {}: name taken", category.id)
                }
                Err(err) => return Err(err),
            }
        }
        Err(errors) => {
            log::debug!("Ignored invalid edit of category {}: {:?}", category.id, errors);
        }
    }

    Ok(redirect("/categories"))
}

/// Pipe for deleting a category, blogs filed under it are kept
/// - url: `{domain}/categories/{category_id}/delete`
///
/// # Response
/// ## Ok
/// - redirect to `/categories`
/// ## Error
/// - Not found
#[get("/categories/{category_id:\\d+}/delete")]
pub async fn category_delete(
    path: web::Path<i32>,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let category = find_category(&app_state, path.into_inner())?;

    app_state.categories.delete(category.id)?;
    log::info!("Category {} deleted", category.id);

    Ok(redirect("/categories"))
}
