//! Adds an account to the database, there is no sign up page.

use clap::Parser;

use secret_blogs::{
    app::AppError,
    auth::password,
    config::AppConfig,
    database::{db_utils::psql_connect_to_db, models::UserRepository, pg::PgStore},
};

#[derive(Parser, Debug)]
#[command(about = "Create a user that can log in to the blog")]
struct Args {
    #[arg(long)]
    username: String,

    #[arg(long)]
    password: String,

    /// Staff members may delete any blog
    #[arg(long)]
    staff: bool,
}

fn run(args: &Args) -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let store = PgStore::new(psql_connect_to_db(&config.database_url).map_err(|err| err.to_string())?);

    if store
        .find_by_username(&args.username)
        .map_err(|err| err.to_string())?
        .is_some()
    {
        return Err(format!("User {} already exists", args.username));
    }

    let user = store
        .create(&args.username, &password::hash(&args.password), args.staff)
        .map_err(|err: AppError| err.to_string())?;
    log::info!(
        "Created user {} with id {}{}",
        user.username,
        user.id,
        if user.is_staff { " (staff)" } else { "" }
    );

    Ok(())
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
