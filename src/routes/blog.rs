use actix_session::Session;
use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse,
};

use super::redirect;
use crate::{
    app::{AppError, AppState},
    auth::{flash, policy, requester::Requester},
    database::models::Blog,
    forms::blog::{validate_blog, BlogForm, BlogInput},
    templates::page_context,
};

fn find_blog(app_state: &AppState, blog_id: i32) -> Result<Blog, AppError> {
    app_state
        .blogs
        .find_by_id(blog_id)?
        .ok_or(AppError::NotFound)
}

fn render_create(
    app_state: &AppState,
    requester: &Requester,
    session: &Session,
    form: BlogForm,
) -> Result<HttpResponse, AppError> {
    let mut context = page_context(requester.user(), flash::take(session));
    context.insert("form", &form);
    context.insert("categories", &app_state.categories.find_all()?);
    app_state.templates.render("blog_create.html", &context)
}

fn render_detail(
    app_state: &AppState,
    requester: &Requester,
    session: &Session,
    blog: &Blog,
    form: BlogForm,
) -> Result<HttpResponse, AppError> {
    let author_name = app_state
        .users
        .find_by_id(blog.author_id)?
        .map(|author| author.username)
        .unwrap_or_default();

    let mut context = page_context(requester.user(), flash::take(session));
    context.insert("blog", blog);
    context.insert("author_name", &author_name);
    context.insert("form", &form);
    context.insert("categories", &app_state.categories.find_all()?);
    app_state.templates.render("blog_detail.html", &context)
}

/// Pipe for listing every blog, newest first
/// - url: `{domain}/blogs`
///
/// # Response
/// ## Ok
/// - html list of all [blogs](Blog), unfiltered
/// ## Error
/// - Internal server error
#[get("/blogs")]
pub async fn blog_list(
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let blogs = app_state.blogs.find_all()?;

    let mut context = page_context(requester.user(), flash::take(&session));
    context.insert("blogs", &blogs);
    app_state.templates.render("blog_list.html", &context)
}

/// Pipe for reading a blog, the page also carries the edit form
/// - url: `{domain}/blogs/{blog_id}`
///
/// # HTTP request requirements
/// - `{blog_id}` as a parameter
///
/// # Response
/// ## Ok
/// - the blog with a form pre-populated from it
/// ## Error
/// - Not found
#[get("/blogs/{blog_id:\\d+}")]
pub async fn blog_detail(
    path: web::Path<i32>,
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let blog = find_blog(&app_state, path.into_inner())?;
    let form = BlogForm::from_record(&blog, app_state.blogs.categories_of(blog.id)?);

    render_detail(&app_state, &requester, &session, &blog, form)
}

/// Pipe for the empty creation form
/// - url: `{domain}/blogs/new`
///
/// # Response
/// ## Ok
/// ## Error
/// - redirect to `/login` when nobody is logged in
#[get("/blogs/new")]
pub async fn blog_create_form(
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
) -> Result<HttpResponse, AppError> {
    requester.require_login()?;
    render_create(&app_state, &requester, &session, BlogForm::default())
}

/// Pipe for creating a new blog
/// - url: `{domain}/blogs/new`
///
/// # HTTP request requirements
/// ## header
/// - session cookie of a logged in user, that user becomes the author
/// ## body
/// - title: [String] - title we wish to name our blog
/// - body: [String] - body of the blog
/// - categories: [i32] (optional, repeated) - ids of the categories
///
/// An `author` key in the body is ignored.
///
/// # Response
/// ## Ok
/// - redirect to `/blogs`
/// - the creation form with field errors when validation fails
/// ## Error
/// - redirect to `/login` when nobody is logged in
/// - Internal server error
#[post("/blogs/new")]
pub async fn blog_create(
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let author = requester.require_login()?;
    let input = BlogInput::from_pairs(form.into_inner());

    match validate_blog(&input, &app_state.categories.find_all()?) {
        Ok(fields) => {
            let blog = app_state.blogs.create(author, &fields)?;
            //The relation needs the id of the saved blog
            app_state.blogs.set_categories(blog.id, &fields.categories)?;
            log::info!("User {} created blog {}", author.id, blog.id);

            Ok(redirect("/blogs"))
        }
        Err(errors) => render_create(&app_state, &requester, &session, BlogForm::bound(&input, errors)),
    }
}

/// Pipe for editing a blog, only its author may do so
/// - url: `{domain}/blogs/{blog_id}/edit`
///
/// # HTTP request requirements
/// - `{blog_id}` as a paremeter
/// ## header
/// - session cookie of the author
/// ## body
/// - same fields as [blog_create]
///
/// # Response
/// ## Ok
/// - redirect to `/blogs/{blog_id}`
/// - the detail page with the bound form when validation fails
/// ## Error
/// - Not found
/// - Forbidden
#[post("/blogs/{blog_id:\\d+}/edit")]
pub async fn blog_edit(
    path: web::Path<i32>,
    app_state: Data<AppState>,
    requester: Requester,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let mut blog = find_blog(&app_state, path.into_inner())?;

    if !policy::can_edit_blog(requester.user(), &blog) {
        log::warn!("Refused edit of blog {} by a non author", blog.id);
        return Err(AppError::PermissionDenied);
    }

    let input = BlogInput::from_pairs(form.into_inner());
    match validate_blog(&input, &app_state.categories.find_all()?) {
        Ok(fields) => {
            blog.apply(&fields);
            app_state.blogs.save(&blog)?;
            app_state.blogs.set_categories(blog.id, &fields.categories)?;
            log::info!("Blog {} edited", blog.id);

            Ok(redirect(&format!("/blogs/{}", blog.id)))
        }
        Err(errors) => render_detail(
            &app_state,
            &requester,
            &session,
            &blog,
            BlogForm::bound(&input, errors),
        ),
    }
}

/// Pipe for deleting a blog, allowed for its author and for staff users
/// - url: `{domain}/blogs/{blog_id}/delete`
///
/// # HTTP request requirements
/// - `{blog_id}` as parameter
///
/// # Response
/// ## Ok
/// - redirect to `/blogs`
/// ## Error
/// - Not found
/// - Forbidden
#[get("/blogs/{blog_id:\\d+}/delete")]
pub async fn blog_delete(
    path: web::Path<i32>,
    app_state: Data<AppState>,
    requester: Requester,
) -> Result<HttpResponse, AppError> {
    let blog = find_blog(&app_state, path.into_inner())?;

    if !policy::can_delete_blog(requester.user(), &blog) {
        log::warn!("Refused deletion of blog {}", blog.id);
        return Err(AppError::PermissionDenied);
    }

    app_state.blogs.delete(blog.id)?;
    log::info!("Blog {} deleted", blog.id);

    Ok(redirect("/blogs"))
}
