pub mod auth;
pub mod blog;
pub mod category;

use actix_web::{get, http::header, web, HttpResponse};

/// Registers every pipe of the site.
///
/// `/blogs/new` goes before `/blogs/{blog_id}`, the id pattern only matches
/// digits anyway.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        //Auth routes
        .service(auth::show_login)
        .service(auth::submit_login)
        .service(auth::show_logout)
        //Blog routes
        .service(blog::blog_list)
        .service(blog::blog_create_form)
        .service(blog::blog_create)
        .service(blog::blog_detail)
        .service(blog::blog_edit)
        .service(blog::blog_delete)
        //Category routes
        .service(category::category_list)
        .service(category::category_create)
        .service(category::category_edit)
        .service(category::category_delete);
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Landing page
#[get("/")]
pub async fn index() -> HttpResponse {
    redirect("/blogs")
}
