//! Service entry-point: config, pool, migrations, HTTP listener.

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use rolodex::outbound::persistence::{run_migrations, DbPool, PoolConfig};
use rolodex::server::{build_state, configure, ServerConfig};
use rolodex::Trace;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    let pool = PoolConfig::new(&config.database_path);
    let pool = DbPool::new(pool).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let state = build_state(pool, &config.random_user).map_err(std::io::Error::other)?;
    let state = web::Data::new(state);

    info!(
        addr = %config.bind_addr,
        database = %config.database_path,
        "starting rolodex server"
    );
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
