use std::io;

use actix_session::{storage::RedisSessionStore, SessionMiddleware};
use actix_web::{middleware::Logger, web::Data, App, HttpServer};

use secret_blogs::{
    app::AppState,
    config::AppConfig,
    database::{db_utils::psql_connect_to_db, pg::PgStore},
    routes,
    templates::Templates,
};

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|err| startup_error("Bad configuration", err))?;

    let postgres_pool = psql_connect_to_db(&config.database_url)
        .map_err(|err| startup_error("Could not connect to postgres", err))?;
    let templates =
        Templates::new().map_err(|err| startup_error("Could not load templates", err))?;
    let app_state = AppState::new(PgStore::new(postgres_pool), templates);

    let session_store = RedisSessionStore::new(config.redis_url.as_str())
        .await
        .map_err(|err| startup_error("Could not connect to redis", err))?;
    let session_key = config.session_key();
    let cookie_secure = config.cookie_secure;

    log::info!(
        "Server running on {}:{}",
        config.bind_address,
        config.port
    );
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(app_state.clone()))
            .wrap(
                SessionMiddleware::builder(session_store.clone(), session_key.clone())
                    .cookie_secure(cookie_secure)
                    .build(),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
