use actix_web::{http::header::ContentType, HttpResponse};
use tera::{Context, Tera};

use crate::{app::AppError, auth::flash::FlashMessage, database::models::User};

/// The page templates, compiled into the binary.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("login.html", include_str!("../templates/login.html")),
            ("blog_form.html", include_str!("../templates/blog_form.html")),
            ("blog_list.html", include_str!("../templates/blog_list.html")),
            ("blog_detail.html", include_str!("../templates/blog_detail.html")),
            ("blog_create.html", include_str!("../templates/blog_create.html")),
            ("list_category.html", include_str!("../templates/list_category.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Renders `name` into a 200 html response.
    pub fn render(&self, name: &str, context: &Context) -> Result<HttpResponse, AppError> {
        let html = self.tera.render(name, context)?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(html))
    }
}

/// Context every page starts from: who is logged in and the pending flash
/// messages.
pub fn page_context(current_user: Option<&User>, messages: Vec<FlashMessage>) -> Context {
    let mut context = Context::new();
    context.insert("current_user", &current_user);
    context.insert("messages", &messages);
    context
}
