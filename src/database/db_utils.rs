use std::sync::Arc;

use diesel::{
    r2d2::{ConnectionManager, Pool},
    PgConnection,
};

use crate::app::AppError;

embed_migrations!("migrations");

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds the connection pool for the hosted database and brings its schema
/// up to date with the embedded migrations.
///
/// # Example
/// ```ignore
/// let pool = psql_connect_to_db("postgres://localhost/secret_blogs")?;
/// ```
pub fn psql_connect_to_db(database_url: &str) -> Result<Arc<PgPool>, AppError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().build(manager)?;

    let conn = pool.get()?;
    embedded_migrations::run(&conn).map_err(|err| {
        log::error!("Running migrations failed: {}", err);
        AppError::InternalServerError
    })?;

    Ok(Arc::new(pool))
}
